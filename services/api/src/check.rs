use crate::infra::InMemoryPlacementRepository;
use clap::Args;
use placement_policy::config::AppConfig;
use placement_policy::error::AppError;
use placement_policy::placement::seed::{load_companies, load_students};
use placement_policy::placement::{CompanyId, PlacementService, PolicyConfig, StudentId};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Student identifier to evaluate
    #[arg(long)]
    pub(crate) student_id: u32,
    /// Company identifier to evaluate against
    #[arg(long)]
    pub(crate) company_id: String,
    /// Policy configuration JSON file (defaults to the built-in policy set)
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Students seed file (defaults to PLACEMENT_STUDENTS_PATH)
    #[arg(long)]
    pub(crate) students: Option<PathBuf>,
    /// Companies seed file (defaults to PLACEMENT_COMPANIES_PATH)
    #[arg(long)]
    pub(crate) companies: Option<PathBuf>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let output = evaluate_offline(args)?;
    println!("{output}");
    Ok(())
}

fn evaluate_offline(args: CheckArgs) -> Result<String, AppError> {
    let config = AppConfig::load()?;
    let students_path = args.students.unwrap_or(config.data.students_path);
    let companies_path = args.companies.unwrap_or(config.data.companies_path);

    let policy = match &args.policy {
        Some(path) => PolicyConfig::from_json(&fs::read_to_string(path)?)?,
        None => PolicyConfig::default(),
    };

    let repository = InMemoryPlacementRepository::new(
        load_students(&students_path)?,
        load_companies(&companies_path)?,
    );
    let service = PlacementService::new(Arc::new(repository), policy)?;
    let result = service.evaluate(StudentId(args.student_id), &CompanyId(args.company_id))?;

    Ok(serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?)
}
