use crate::cli::args::CheckArgs;
use crate::exit_codes::{EXIT_HIDDEN, EXIT_INTERNAL_ERROR, EXIT_SUCCESS};
use ipgate_core::{Element, Gate, GateConfig, GateOutcome, InMemoryDocument, PageElement};
use serde::Serialize;
use tracing::{error, info};

/// Printed result of `ipgate check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub outcome: &'static str,
    pub element_id: String,
    pub ip: Option<String>,
    /// Display value after the run; `None` when the page had no such element.
    pub display: Option<String>,
    pub error: Option<String>,
}

impl CheckReport {
    fn new(outcome: &GateOutcome, element_id: String, page: &InMemoryDocument) -> Self {
        let display = page.get(&element_id).map(|el| el.display().to_string());
        let error = match outcome {
            GateOutcome::FailedOpen { error } => Some(error.to_string()),
            _ => None,
        };

        Self {
            outcome: outcome.label(),
            ip: outcome.client_ip().map(|ip| ip.to_string()),
            element_id,
            display,
            error,
        }
    }
}

pub(crate) fn gate_config(args: &CheckArgs) -> GateConfig {
    let mut config = GateConfig::from_env();
    if let Some(url) = &args.identity_url {
        config = config.with_identity_url(url);
    }
    if let Some(url) = &args.authorization_url {
        config = config.with_authorization_url(url);
    }
    if let Some(id) = &args.element_id {
        config = config.with_element_id(id);
    }
    config
}

pub async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let config = gate_config(&args);

    let gate = match Gate::from_config(&config) {
        Ok(gate) => gate,
        Err(e) => {
            error!(error = %e, "failed to build gate");
            return Ok(EXIT_INTERNAL_ERROR);
        }
    };

    let mut page = InMemoryDocument::new();
    if !args.missing_element {
        page = page.with_element(&config.element_id, Element::with_display(&args.display));
    }

    let outcome = gate.run(&mut page).await;
    let report = CheckReport::new(&outcome, config.element_id, &page);
    info!(
        outcome = report.outcome,
        element_id = %report.element_id,
        "gate run finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }

    Ok(if outcome.hid_element() {
        EXIT_HIDDEN
    } else {
        EXIT_SUCCESS
    })
}

fn print_human(report: &CheckReport) {
    println!("outcome:  {}", report.outcome);
    println!("ip:       {}", report.ip.as_deref().unwrap_or("-"));
    match &report.display {
        Some(display) => println!("element:  #{} display={:?}", report.element_id, display),
        None => println!("element:  #{} (not on page)", report.element_id),
    }
    if let Some(error) = &report.error {
        println!("error:    {error}");
    }
}
