use std::{env, fs, path::PathBuf, process};

use potluck_application::{
    BillSplitService, Event, LedgerBuildError, LedgerBuilder, NotifyError, PaymentRequest,
    PaymentRequestError, PaymentRequestNotifier,
};
use potluck_domain::SettlementCalculator;
use potluck_presentation::BillSplitPresenter;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod config;

use config::{CliConfig, ConfigError, OutputFormat};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: potluck [--request-payments] <event.json>")]
    Usage,
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse event '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot split the bill: {0}")]
    BillSplit(#[from] LedgerBuildError),
    #[error("cannot request payments: {0}")]
    PaymentRequest(#[from] PaymentRequestError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

struct Args {
    path: PathBuf,
    request_payments: bool,
}

/// Logs each payment request instead of delivering it.
struct LogNotifier;

impl PaymentRequestNotifier for LogNotifier {
    fn send(&self, request: &PaymentRequest<'_>) -> Result<(), NotifyError> {
        tracing::info!(
            to = request.debtor_contact,
            debtor = request.debtor,
            creditor = request.creditor,
            amount = %request.amount,
            "Payment request drafted (dry run)"
        );
        Ok(())
    }
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    let args = parse_args(env::args().skip(1))?;
    let config = CliConfig::from_env()?;

    let source = fs::read_to_string(&args.path).map_err(|source| CliError::Read {
        path: args.path.clone(),
        source,
    })?;
    let event: Event = serde_json::from_str(&source).map_err(|source| CliError::Parse {
        path: args.path.clone(),
        source,
    })?;

    let service = BillSplitService::new(
        LedgerBuilder::new(config.scope, config.context.scale()),
        SettlementCalculator::new(config.context),
    );
    let split = match service.compute(&event) {
        Ok(split) => split,
        Err(LedgerBuildError::CostsNotTracked(_)) if config.output == OutputFormat::Text => {
            print!(
                "{}",
                BillSplitPresenter::render_costs_not_tracked(event.language)
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match config.output {
        OutputFormat::Text => print!("{}", BillSplitPresenter::render(&split)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&split)?),
    }

    if args.request_payments {
        let requests = service.request_payments(&event, &split, &LogNotifier)?;
        tracing::info!(count = requests.len(), "Payment requests drafted");
    }

    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, CliError> {
    let mut path = None;
    let mut request_payments = false;

    for arg in args {
        if arg == "--request-payments" {
            request_payments = true;
        } else if arg.starts_with("--") || path.is_some() {
            return Err(CliError::Usage);
        } else {
            path = Some(PathBuf::from(arg));
        }
    }

    let path = path.ok_or(CliError::Usage)?;
    Ok(Args {
        path,
        request_payments,
    })
}
