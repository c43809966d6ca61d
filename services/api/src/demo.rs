use crate::infra::{
    build_recovery_service, parse_date, InMemoryCaseDirectory, InMemoryRecoveryService,
    InMemorySpecialRoleRegistry,
};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use contentieux::error::AppError;
use contentieux::workflows::recovery::{
    ActorAssignment, AgentId, AgentRef, AggregationView, Case, CaseDirectory, CaseId, CaseRole,
    Destination, Payment, PaymentCsvImporter, PaymentId, PaymentStatus, ReportPeriod,
    SpecialRole, SpecialRoleWindow,
};
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the published audit trails after settlement.
    #[arg(long)]
    pub(crate) show_audit: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecoveryReportArgs {
    /// Period start (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) period_start: NaiveDate,
    /// Period end (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) period_end: NaiveDate,
    /// Entity grouping for the per-individual totals
    #[arg(long, value_enum, default_value_t = ReportView::Agent)]
    pub(crate) view: ReportView,
    /// Optional payment CSV export; defaults to the built-in demo payments
    #[arg(long)]
    pub(crate) payments_csv: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub(crate) enum ReportView {
    Agent,
    Service,
    Center,
}

impl From<ReportView> for AggregationView {
    fn from(view: ReportView) -> Self {
        match view {
            ReportView::Agent => AggregationView::ByAgent,
            ReportView::Service => AggregationView::ByService,
            ReportView::Center => AggregationView::ByCenter,
        }
    }
}

fn demo_agent(id: &str, name: &str, service_code: &str, center_code: &str) -> AgentRef {
    AgentRef {
        id: AgentId(id.to_string()),
        name: name.to_string(),
        service_code: service_code.to_string(),
        center_code: center_code.to_string(),
    }
}

fn seed_demo_dataset(
    directory: &InMemoryCaseDirectory,
    registry: &InMemorySpecialRoleRegistry,
) -> CaseId {
    let case = Case {
        id: CaseId("aff-2024-001".to_string()),
        case_number: "AFF/2024/001".to_string(),
        fine_amount: dec!(2_500_000),
        opened_on: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
    };
    let case_id = case.id.clone();

    let assignments = vec![
        ActorAssignment {
            case_id: case_id.clone(),
            agent: demo_agent("agt-100", "M. Dupont", "SRV-EST", "CTR-01"),
            role: CaseRole::Chief,
        },
        ActorAssignment {
            case_id: case_id.clone(),
            agent: demo_agent("agt-101", "Mme Laurent", "SRV-EST", "CTR-01"),
            role: CaseRole::Chief,
        },
        ActorAssignment {
            case_id: case_id.clone(),
            agent: demo_agent("agt-200", "M. Moreau", "SRV-OUEST", "CTR-02"),
            role: CaseRole::SeizingAgent,
        },
        ActorAssignment {
            case_id: case_id.clone(),
            agent: demo_agent("agt-201", "Mme Petit", "SRV-OUEST", "CTR-02"),
            role: CaseRole::SeizingAgent,
        },
        ActorAssignment {
            case_id: case_id.clone(),
            agent: demo_agent("agt-202", "M. Roux", "SRV-NORD", "CTR-01"),
            role: CaseRole::SeizingAgent,
        },
    ];
    directory
        .register(case, assignments)
        .expect("demo case registers");

    registry.appoint(SpecialRoleWindow {
        role: SpecialRole::DirectorGeneral,
        agent: demo_agent("agt-900", "M. Garnier", "DIR-GEN", "CTR-HQ"),
        active_from: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        active_to: None,
    });

    case_id
}

fn demo_payments(case_id: &CaseId) -> Vec<Payment> {
    vec![
        Payment {
            id: PaymentId("enc-001".to_string()),
            case_id: case_id.clone(),
            amount: dec!(1_000_000),
            date: NaiveDate::from_ymd_opt(2024, 2, 10).expect("valid date"),
            status: PaymentStatus::Validated,
        },
        Payment {
            id: PaymentId("enc-002".to_string()),
            case_id: case_id.clone(),
            amount: dec!(350_000.50),
            date: NaiveDate::from_ymd_opt(2024, 4, 2).expect("valid date"),
            status: PaymentStatus::Validated,
        },
        // left pending by the collection workflow; settlement refuses it
        Payment {
            id: PaymentId("enc-003".to_string()),
            case_id: case_id.clone(),
            amount: dec!(5_000),
            date: NaiveDate::from_ymd_opt(2024, 5, 25).expect("valid date"),
            status: PaymentStatus::Pending,
        },
    ]
}

fn seeded_demo_service() -> (Arc<InMemoryRecoveryService>, CaseId, DemoAudit) {
    let (service, directory, registry, audit) = build_recovery_service();
    let case_id = seed_demo_dataset(&directory, &registry);
    (service, case_id, audit)
}

type DemoAudit = Arc<crate::infra::InMemoryAuditSink>;

pub(crate) fn run_recovery_report(args: RecoveryReportArgs) -> Result<(), AppError> {
    let RecoveryReportArgs {
        period_start,
        period_end,
        view,
        payments_csv,
    } = args;

    let (service, case_id, _audit) = seeded_demo_service();
    let payments = match payments_csv {
        Some(path) => PaymentCsvImporter::from_path(path)?,
        None => demo_payments(&case_id),
    };

    let period = ReportPeriod {
        from: period_start,
        to: period_end,
    };
    let totals = service.accumulate(period, &payments);
    let summary = totals.summary(view.into());

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, case_id, audit) = seeded_demo_service();
    let payments = demo_payments(&case_id);

    println!("== settling demo payments ==");
    for payment in &payments {
        match service.settle(payment) {
            Ok(result) => {
                println!(
                    "payment {} ({}): chiefs pool {}, seizing pool {}, {} individual shares",
                    payment.id,
                    payment.amount,
                    result.chiefs_pool,
                    result.seizing_pool,
                    result.individual_shares.len()
                );
            }
            Err(err) => println!("payment {} skipped: {err}", payment.id),
        }
    }

    if args.show_audit {
        println!("\n== audit trails ==");
        for trail in audit.trails() {
            for entry in &trail.entries {
                let destination = match &entry.destination {
                    Destination::Pool(pool) => pool.code().to_string(),
                    Destination::Agent { id, role } => format!("{id} ({})", role.label()),
                };
                println!(
                    "{}  {:<24} {:>6}  {}",
                    trail.payment_id, destination, entry.percentage, entry.amount
                );
            }
        }
    }

    let period = ReportPeriod {
        from: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        to: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
    };
    let totals = service.accumulate(period, &payments);

    println!("\n== period report ==");
    for view in [
        AggregationView::ByAgent,
        AggregationView::ByService,
        AggregationView::ByCenter,
    ] {
        let summary = totals.summary(view);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
    }

    Ok(())
}
