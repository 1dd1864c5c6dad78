use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use zcam::{ClientConfig, Mode, PullOptions, ZCam};

#[derive(Parser, Debug)]
#[command(author, version, about = "Control a Z CAM over its HTTP API")]
struct Args {
    /// Camera address; falls back to ZCAM_ADDRESS, then 10.98.32.1
    #[arg(short, long)]
    address: Option<String>,

    /// Request timeout in seconds, 0 for none; falls back to ZCAM_TIMEOUT_SECS
    #[arg(short, long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the camera's info JSON
    Info,
    /// Print the current operating state
    Status,
    /// List DCIM folders
    Dirs,
    /// List files in a DCIM folder
    Files { dir: String },
    /// Download every file on the card
    Pull {
        #[arg(short, long, default_value = ".")]
        dst: PathBuf,
        #[arg(long)]
        proxy: bool,
    },
    /// Download a single file by name
    PullVideo {
        file: String,
        #[arg(short, long, default_value = ".")]
        dst: PathBuf,
        #[arg(long)]
        proxy: bool,
    },
    /// Switch operating mode
    Mode { mode: ModeArg },
    /// Read a setting
    Get { key: String },
    /// Change a setting
    Set { key: String, value: String },
    /// Recording control
    Rec { action: RecAction },
    Reboot,
    Shutdown,
    /// Open or close the control session
    Session { action: SessionAction },
    /// Switch or query the network mode
    Network { action: NetworkAction },
    /// Set the camera clock to this machine's local time
    SyncDate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Rec,
    Pb,
    Standby,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Rec => Mode::Record,
            ModeArg::Pb => Mode::Playback,
            ModeArg::Standby => Mode::Standby,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RecAction {
    Start,
    Stop,
    Remain,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SessionAction {
    Start,
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NetworkAction {
    Router,
    Direct,
    Query,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env();
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(secs) = args.timeout {
        config.set_timeout_secs(secs);
    }

    info!("[ZCam] Using camera at {}", config.address);
    let cam = ZCam::with_config(config);
    run(&cam, args.command)
        .await
        .with_context(|| format!("camera at {}", cam.address()))
}

async fn run(cam: &ZCam, command: Command) -> zcam::Result<()> {
    match command {
        Command::Info => {
            let info = cam.info().await?;
            println!("{}", serde_json::to_string_pretty(&info).unwrap_or_default());
        }
        Command::Status => println!("{}", cam.status().await?),
        Command::Dirs => {
            for dir in cam.get_dirs().await? {
                println!("{}", dir);
            }
        }
        Command::Files { dir } => {
            for file in cam.get_files(&dir).await? {
                println!("{}", file);
            }
        }
        Command::Pull { dst, proxy } => {
            let opts = PullOptions::default().proxy(proxy);
            for path in cam.pull(&dst, &opts).await? {
                println!("{}", path.display());
            }
        }
        Command::PullVideo { file, dst, proxy } => {
            let opts = PullOptions::default().proxy(proxy);
            let path = cam.pull_video(&file, &dst, &opts).await?;
            println!("{}", path.display());
        }
        Command::Mode { mode } => cam.mode(mode.into()).await?,
        Command::Get { key } => {
            let setting = cam.get_setting(&key).await?;
            let ro = if setting.read_only { " (read-only)" } else { "" };
            println!("{} = {}{}", setting.key, setting.value, ro);
            if !setting.opts.is_empty() {
                println!("options: {}", setting.opts.join(", "));
            }
        }
        Command::Set { key, value } => cam.set_setting_value(&key, &value).await?,
        Command::Rec { action } => match action {
            RecAction::Start => cam.recording_start().await?,
            RecAction::Stop => cam.recording_stop().await?,
            RecAction::Remain => cam.recording_remain().await?,
        },
        Command::Reboot => cam.reboot().await?,
        Command::Shutdown => cam.shutdown().await?,
        Command::Session { action } => match action {
            SessionAction::Start => cam.session_start().await?,
            SessionAction::Quit => cam.session_quit().await?,
        },
        Command::Network { action } => match action {
            NetworkAction::Router => cam.network_router().await?,
            NetworkAction::Direct => cam.network_direct().await?,
            NetworkAction::Query => println!("{}", cam.network_type().await?),
        },
        Command::SyncDate => cam.sync_date().await?,
    }
    Ok(())
}
