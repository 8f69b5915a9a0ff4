use std::rc::Rc;

use nbstatus_config::StatusConfig;
use nbstatus_core::{
    Collaborators, DocumentEvent, DocumentIdentity, Driver, LoopTimer, StatusWidget, SystemClock,
    WidgetInput, init_logging, pump_lines,
};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

mod app;
pub(crate) mod color;
mod host;

use app::HostArgs;
use host::{LocalDocument, TerminalDialogs, TerminalLocation, TerminalSurface};

fn main() {
    let matches = app::build_cli().get_matches();

    if matches.get_flag("no-color") {
        color::set_no_color();
    }
    init_logging(matches.get_flag("quiet"), matches.get_flag("json-logs"));
    info!(event = "host.start_started");

    let exit_code = match run(HostArgs::from_matches(&matches)) {
        Ok(()) => {
            info!(event = "host.start_completed");
            0
        }
        Err(e) => {
            error!(event = "host.start_failed", error = %e);
            eprintln!("nbstatus: {}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(args: HostArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = StatusConfig::load_hierarchy()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(serve(config, args));
    // A blocking stdin read may still be in flight.
    rt.shutdown_background();
    Ok(())
}

async fn serve(config: StatusConfig, args: HostArgs) {
    let (tx, rx) = mpsc::unbounded_channel();
    let timer = LoopTimer::new();
    let document = Rc::new(LocalDocument::new(
        DocumentIdentity {
            name: args.name,
            path: args.path,
            base_url: args.base_url,
        },
        tx.clone(),
    ));

    let widget = StatusWidget::new(
        &config,
        Collaborators {
            document,
            surface: Box::new(TerminalSurface::new(config.messages.save_failed())),
            dialogs: Box::new(TerminalDialogs),
            location: Box::new(TerminalLocation),
            timer: Box::new(timer.clone()),
            clock: Box::new(SystemClock),
            formatter: None,
        },
    );

    if tx
        .send(WidgetInput::Event(DocumentEvent::NotebookLoaded))
        .is_err()
    {
        return;
    }

    let pump = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = pump_lines(stdin, tx.clone()).await {
            warn!(event = "host.input_failed", error = %e);
            let _ = tx.send(WidgetInput::Shutdown);
        }
    });

    let widget = Driver::new(widget, timer, rx).run().await;
    pump.abort();

    info!(
        event = "host.serve_completed",
        checkpoint = ?widget.scheduler().checkpoint_date()
    );
}
