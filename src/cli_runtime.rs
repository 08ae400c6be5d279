use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use time::OffsetDateTime;

use larder::notify::{NoticeLog, Notifier};
use larder::remote::{GatewayError, RemoteClient};
use larder::session::{AuthSession, SessionStatus};
use larder::store::{LocalStore, TokenStorage};

use crate::Commands;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Recipes, inventory and shopping list", long_about = None)]
pub(crate) struct Cli {
    /// Profile directory (defaults to ./.larder)
    #[arg(long, global = true, env = "LARDER_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let home = match cli.home {
        Some(home) => home,
        None => LocalStore::profile_dir(&std::env::current_dir().context("get current dir")?),
    };
    crate::cli_exec::handle_command(&home, cli.command)
}

/// Everything a command needs to talk to the API.
pub(crate) struct App {
    pub(crate) store: LocalStore,
    pub(crate) session: Arc<AuthSession>,
    pub(crate) client: RemoteClient,
    pub(crate) notices: NoticeLog,
}

impl App {
    pub(crate) fn open(home: &Path) -> Result<Self> {
        let store = LocalStore::open(home)?;
        let config = store.read_config()?;
        let storage: Arc<dyn TokenStorage> = Arc::new(store.clone());
        let session = Arc::new(AuthSession::new(storage));
        let client = RemoteClient::new(&config, session.clone())?;
        Ok(Self {
            store,
            session,
            client,
            notices: NoticeLog::new(),
        })
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(self.notices.clone())
    }

    pub(crate) fn require_login(&self) -> Result<()> {
        match self.session.restore(OffsetDateTime::now_utc())? {
            SessionStatus::Active { .. } => Ok(()),
            SessionStatus::Anonymous => {
                anyhow::bail!("not logged in (run `larder login --username ... --password ...`)")
            }
            SessionStatus::Expired | SessionStatus::Malformed => {
                anyhow::bail!("session expired; log in again (run `larder login ...`)")
            }
        }
    }

    /// Prints and clears collected notices.
    pub(crate) fn report_notices(&self) {
        for n in self.notices.drain() {
            eprintln!("[{}] {}", n.kind, n.message);
        }
    }
}

pub(crate) fn gateway_error(err: GatewayError) -> anyhow::Error {
    match &err {
        GatewayError::Auth { .. } => {
            anyhow::anyhow!("unauthorized: session cleared (run `larder login ...`)")
        }
        GatewayError::Validation { .. } => {
            let mut lines = vec![err.user_message()];
            for (field, msgs) in err.field_errors() {
                lines.push(format!("  {}: {}", field, msgs.join(" ")));
            }
            anyhow::anyhow!(lines.join("\n"))
        }
        _ => anyhow::Error::new(err.clone()).context(err.user_message()),
    }
}
