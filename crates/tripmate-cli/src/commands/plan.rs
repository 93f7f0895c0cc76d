use colored::Colorize;
use tripmate_agent::{PlanOutcome, Session, TripForm, TripPlanner};

pub async fn run(planner: TripPlanner, form: TripForm) -> anyhow::Result<()> {
    let session = Session::new();

    eprintln!("{}", "Planning your trip...".italic());

    match planner.submit(&session, form).await? {
        PlanOutcome::Rejected { warning } => {
            eprintln!("{}", warning.yellow());
        }
        PlanOutcome::Planned { entry } if entry.is_error => {
            eprintln!("{}", entry.response.red());
            std::process::exit(1);
        }
        PlanOutcome::Planned { entry } => {
            println!("{}\n", "🌍 Gemini Travel Plan".green().bold());
            println!("{}", entry.response);
        }
    }

    Ok(())
}
