use anyhow::{Context, Result};
use boardscan_core::config::default_python;
use boardscan_core::report::{
    banner, BOARDS_SECTION, NEXT_STEPS, NEXT_STEPS_SECTION, PORTS_SECTION, SETUP_SECTION,
    TASKS_SECTION, TITLE,
};
use boardscan_core::{
    ports, probe, tasks, PortSource, ProbeSource, Recommendation, Scan, ScanConfig, SetupError,
    SetupResult, SystemRunner,
};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Where to look for connected boards
    #[arg(long, value_enum, default_value_t = ProbeArg::Nrfjprog)]
    probe_source: ProbeArg,

    /// nrfjprog executable
    #[arg(long, value_name = "PATH", default_value = "nrfjprog")]
    nrfjprog: String,

    /// Where to look for serial ports
    #[arg(long, value_enum, default_value_t = PortArg::Pyserial)]
    port_source: PortArg,

    /// Python interpreter with pyserial installed
    #[arg(long, value_name = "PATH", default_value = default_python())]
    python: String,

    /// Print the findings as JSON instead of the setup report
    #[arg(long)]
    json: bool,

    /// Write the recommended inputs into this tasks.json
    #[arg(long, value_name = "PATH")]
    apply: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProbeArg {
    Nrfjprog,
    ProbeRs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PortArg {
    Pyserial,
    Native,
}

impl From<ProbeArg> for ProbeSource {
    fn from(arg: ProbeArg) -> Self {
        match arg {
            ProbeArg::Nrfjprog => Self::Nrfjprog,
            ProbeArg::ProbeRs => Self::ProbeRs,
        }
    }
}

impl From<PortArg> for PortSource {
    fn from(arg: PortArg) -> Self {
        match arg {
            PortArg::Pyserial => Self::Pyserial,
            PortArg::Native => Self::Native,
        }
    }
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            probe_source: self.probe_source.into(),
            nrfjprog: self.nrfjprog.clone(),
            port_source: self.port_source.into(),
            python: self.python.clone(),
        }
    }
}

/// Prints the human-readable report; silent in JSON mode.
struct Console {
    enabled: bool,
}

impl Console {
    fn section(&self, title: &str) {
        if self.enabled {
            println!("{}", banner(title));
        }
    }

    fn line(&self, text: &str) {
        if self.enabled {
            println!("{text}");
        }
    }

    /// Echo what a discovery step saw.
    fn scan(&self, scan: &Scan) {
        match &scan.output {
            Some(output) => self.line(output),
            None => {
                for item in &scan.items {
                    self.line(item);
                }
            }
        }
    }
}

/// Run one discovery step, turning any failure into a warning and an empty list.
fn discover(
    console: &Console,
    result: SetupResult<Scan>,
    failure: impl Fn(&SetupError) -> String,
) -> Vec<String> {
    match result {
        Ok(scan) => {
            console.scan(&scan);
            scan.items
        }
        Err(e) => {
            if console.enabled {
                console.line(&failure(&e));
            } else {
                warn!("{e}");
            }
            Vec::new()
        }
    }
}

fn apply_tasks(console: &Console, path: &Path, rec: &Recommendation) {
    console.section(TASKS_SECTION);

    if rec.assignment.is_empty() {
        console.line("\n⚠ Nothing to write: fewer than two boards and two serial ports found");
        info!("Skipping {}: nothing to assign", path.display());
        return;
    }

    match tasks::apply_to_file(path, &rec.assignment) {
        Ok(updated) if updated.is_empty() => {
            console.line(&format!("\n⚠ {} has none of the recommended inputs", path.display()));
        }
        Ok(updated) => {
            info!("Updated {} in {}", updated.join(", "), path.display());
            console.line(&format!("\n✓ Updated {}:", path.display()));
            for id in &updated {
                console.line(&format!("  {id}"));
            }
        }
        Err(e) => {
            warn!("{e}");
            console.line(&format!("\n❌ Error: {e}"));
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.scan_config();
    debug!("Scan configuration: {config:?}");

    let console = Console { enabled: !args.json };
    console.section(TITLE);

    console.section(BOARDS_SECTION);
    let probe_manager = config.probe_manager();
    let boards = discover(&console, probe_manager.scan(&SystemRunner), |e| {
        probe::failure_message(probe_manager.tool(), e)
    });

    console.section(PORTS_SECTION);
    let ports =
        discover(&console, config.port_manager().scan(&SystemRunner), ports::failure_message);

    let rec = Recommendation::new(boards, ports);
    if args.json {
        let json = serde_json::to_string_pretty(&rec).context("Failed to serialize findings")?;
        println!("{json}");
    } else {
        console.section(SETUP_SECTION);
        print!("{rec}");
    }

    if let Some(path) = &args.apply {
        apply_tasks(&console, path, &rec);
    }

    console.section(NEXT_STEPS_SECTION);
    console.line(NEXT_STEPS);

    Ok(())
}
