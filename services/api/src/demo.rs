use crate::infra::build_dashboard;
use chrono::Local;
use clap::Args;
use tutorlink::dashboard::{
    ApplicationRequest, ApplicationStatus, ReportEntry, StudentId, TeacherId, TuitionId,
};
use tutorlink::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Teacher id whose dashboard the demo drives
    #[arg(long, default_value = "teacher-demo")]
    pub(crate) teacher: String,
    /// Student id used for the progress report portion
    #[arg(long, default_value = "student-demo")]
    pub(crate) student: String,
    /// Start from an empty dashboard instead of seeding demo fixtures
    #[arg(long)]
    pub(crate) skip_seed: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        teacher,
        student,
        skip_seed,
    } = args;

    let teacher = TeacherId(teacher);
    let student = StudentId(student);
    let (services, feed) = build_dashboard();
    let mut changes = feed.subscribe();

    println!("Tutorlink dashboard demo for teacher '{}'", teacher.0);

    if !skip_seed {
        let seeded = services.seeder.seed_if_needed(&teacher)?;
        println!(
            "Demo fixtures: {}",
            if seeded { "seeded" } else { "already present" }
        );
    }

    let application = services.applications.apply(
        &teacher,
        ApplicationRequest {
            tuition_id: TuitionId("tuition-cli-001".to_string()),
            title: "Grade 8 Mathematics".to_string(),
            location: "Dhanmondi".to_string(),
            proposal: Some("Submitted from the CLI demo.".to_string()),
            expected_salary: Some(5000),
        },
    )?;
    println!(
        "Applied to '{}' as {} ({})",
        application.title,
        application.id.0,
        application.status.label()
    );

    services
        .applications
        .set_status(&teacher, &application.id, ApplicationStatus::Shortlisted)?;

    println!("\nApplications");
    for application in services.applications.list(&teacher) {
        println!(
            "- {} | {} | {} | applied {} | status {}",
            application.id.0,
            application.title,
            application.location,
            application.applied_on,
            application.status.label()
        );
    }

    println!("\nContracts");
    let contracts = services.ledger.contracts(&teacher);
    if contracts.is_empty() {
        println!("- none");
    }
    for contract in contracts {
        println!(
            "- {} | {} | {} | from {} | {}/month | {}",
            contract.id.0,
            contract.student_name,
            contract.subject,
            contract.start_date,
            contract.salary,
            contract.status.label()
        );
    }

    services.reports.append(
        &teacher,
        &student,
        ReportEntry {
            performance: "Good".to_string(),
            comments: "Logged from the CLI demo.".to_string(),
            date: Some(Local::now().date_naive()),
        },
    )?;
    println!("\nProgress reports for student '{}'", student.0);
    for report in services.reports.list(&teacher, &student) {
        println!(
            "- {} | {} | {} | {}",
            report.id.0, report.date, report.performance, report.comments
        );
    }

    let stats = services.ledger.stats(&teacher);
    println!("\nDashboard statistics");
    println!("- applications: {}", stats.total_applications);
    println!("- shortlisted: {}", stats.shortlisted);
    println!("- hired: {}", stats.hired);
    println!("- rating: {:.1}", stats.rating);
    println!("- earned: {}", stats.total_earned);
    println!("- pending payments: {}", stats.pending_payments);

    println!("\nChange feed");
    while let Ok(event) = changes.try_recv() {
        println!(
            "- {} | {} | {}",
            event.teacher.0,
            event.kind.label(),
            event.record_id
        );
    }

    Ok(())
}
