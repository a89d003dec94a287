use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use internship_portal::config::AppConfig;
use internship_portal::error::AppError;
use internship_portal::telemetry;
use internship_portal::workflows::applications::{
    Availability, DraftField, InMemoryApplicationRepository, SessionError,
};
use internship_portal::workflows::catalog::{CatalogAction, FilterUpdate, InternshipId};
use internship_portal::workflows::portal::Portal;

use crate::demo::run_demo;
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "Internship Portal",
    about = "Browse internships and apply to them from the command line",
    version
)]
struct Cli {
    /// CSV export to load instead of the built-in listings
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List internships, optionally filtered (default command)
    List(ListArgs),
    /// Show the full details of one internship
    Show(ShowArgs),
    /// Submit an application for an internship
    Apply(ApplyArgs),
    /// Walk through filtering and two submissions against the built-in listings
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Exact category, e.g. Technology
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Substring of the location, e.g. "CA"
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Remote, On-site or Hybrid
    #[arg(long = "type")]
    pub(crate) work_type: Option<String>,
    /// Matches titles and company names
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Print the listing as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Internship id
    id: InternshipId,
    /// Print the detail view as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Internship id
    id: InternshipId,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    university: String,
    #[arg(long, default_value = "")]
    major: String,
    #[arg(long, default_value = "")]
    graduation_year: String,
    #[arg(long)]
    gpa: Option<String>,
    /// Cover letter text
    #[arg(long, default_value = "")]
    cover_letter: String,
    /// Resume file name (.pdf, .doc or .docx)
    #[arg(long)]
    resume: Option<String>,
    #[arg(long)]
    linkedin_url: Option<String>,
    #[arg(long)]
    portfolio_url: Option<String>,
    /// immediately, 2-weeks, 1-month or flexible
    #[arg(long, value_parser = parse_availability)]
    availability: Option<Availability>,
    #[arg(long)]
    experience: Option<String>,
    /// Skip the simulated submission latency
    #[arg(long)]
    no_delay: bool,
}

impl ApplyArgs {
    fn edits(&self) -> Vec<(DraftField, String)> {
        let mut edits = vec![
            (DraftField::FirstName, self.first_name.clone()),
            (DraftField::LastName, self.last_name.clone()),
            (DraftField::Email, self.email.clone()),
            (DraftField::Phone, self.phone.clone()),
            (DraftField::University, self.university.clone()),
            (DraftField::Major, self.major.clone()),
            (DraftField::GraduationYear, self.graduation_year.clone()),
            (DraftField::CoverLetter, self.cover_letter.clone()),
        ];

        let optional = [
            (DraftField::Gpa, &self.gpa),
            (DraftField::Resume, &self.resume),
            (DraftField::LinkedinUrl, &self.linkedin_url),
            (DraftField::PortfolioUrl, &self.portfolio_url),
            (DraftField::Experience, &self.experience),
        ];
        edits.extend(
            optional
                .into_iter()
                .filter_map(|(field, value)| value.clone().map(|value| (field, value))),
        );

        if let Some(availability) = self.availability {
            edits.push((DraftField::Availability, availability.label().to_string()));
        }
        edits
    }
}

fn parse_availability(raw: &str) -> Result<Availability, String> {
    raw.parse::<Availability>().map_err(|err| err.to_string())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.catalog {
        config.catalog.csv_path = Some(path);
    }
    telemetry::init(&config.telemetry)?;

    let mut portal = Portal::from_config(&config)?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::List(ListArgs::default()));

    match command {
        Command::List(args) => run_list(&mut portal, args),
        Command::Show(args) => run_show(&portal, args),
        Command::Apply(args) => run_apply(&portal, args).await,
        Command::Demo => run_demo(&mut portal).await,
    }
}

fn run_list(
    portal: &mut Portal<InMemoryApplicationRepository>,
    args: ListArgs,
) -> Result<(), AppError> {
    let update = FilterUpdate {
        category: args.category,
        location: args.location,
        work_type: args.work_type,
        search: args.search,
    };
    portal.dispatch(CatalogAction::SetFilters(update));

    if args.json {
        render::print_json(&portal.cards())
    } else {
        render::listing(portal);
        Ok(())
    }
}

fn run_show(
    portal: &Portal<InMemoryApplicationRepository>,
    args: ShowArgs,
) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let detail = match portal.detail(args.id, today) {
        Ok(detail) => detail,
        Err(err) => {
            render::not_found(args.id);
            return Err(err.into());
        }
    };

    if args.json {
        render::print_json(&detail)
    } else {
        render::detail(&detail);
        Ok(())
    }
}

async fn run_apply(
    portal: &Portal<InMemoryApplicationRepository>,
    args: ApplyArgs,
) -> Result<(), AppError> {
    let mut session = match portal.open_application(args.id) {
        Ok(session) => session,
        Err(err) => {
            render::not_found(args.id);
            return Err(err.into());
        }
    };

    for (field, value) in args.edits() {
        session.edit(field, value)?;
    }

    let latency = if args.no_delay {
        std::time::Duration::ZERO
    } else {
        portal.submission().simulated_latency
    };

    match session.submit_with_latency(latency).await {
        Ok(record) => {
            let listing = portal.catalog().find(record.internship_id)?;
            render::submitted(&record, listing);
            Ok(())
        }
        Err(SessionError::Rejected(errors)) => {
            render::validation_errors(&errors);
            Err(SessionError::Rejected(errors).into())
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_args_only_forward_provided_optionals() {
        let cli = Cli::try_parse_from([
            "portal",
            "apply",
            "2",
            "--first-name",
            "Ada",
            "--gpa",
            "3.5",
            "--availability",
            "1-month",
        ])
        .expect("arguments parse");

        let Some(Command::Apply(args)) = cli.command else {
            panic!("expected apply command");
        };
        assert_eq!(args.id, InternshipId(2));

        let edits = args.edits();
        assert!(edits.contains(&(DraftField::FirstName, "Ada".to_string())));
        assert!(edits.contains(&(DraftField::Gpa, "3.5".to_string())));
        assert!(edits.contains(&(DraftField::Availability, "1-month".to_string())));
        assert!(!edits.iter().any(|(field, _)| *field == DraftField::Resume));
    }

    #[test]
    fn rejects_unknown_availability() {
        let result = Cli::try_parse_from(["portal", "apply", "1", "--availability", "someday"]);
        assert!(result.is_err());
    }
}
