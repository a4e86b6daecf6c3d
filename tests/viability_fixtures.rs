use program_viability::viability::{
    CostModel, DeliveryFormat, EngineConfig, OfflineWageService, ProgramRequest, ProgramType,
    Scenario, ViabilityEngine, WageService, WageServiceError,
};

/// Answers every national lookup with one median; regional lookups are unavailable.
struct FlatNationalWage(f64);

impl WageService for FlatNationalWage {
    async fn median_annual_wage(
        &self,
        _occupation_code: &str,
        region: Option<&str>,
    ) -> Result<f64, WageServiceError> {
        match region {
            Some(_) => Err(WageServiceError::Unavailable("regional data offline".to_string())),
            None => Ok(self.0),
        }
    }
}

fn licensure_program() -> ProgramRequest {
    ProgramRequest {
        program_name: "Pharmacy Technician".to_string(),
        tuition_estimate: 3_000.0,
        cohort_size: 20,
        total_seat_hours: 400.0,
        sections_per_year: 2,
        has_existing_lab_space: false,
        grant_eligible: true,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

fn refresher_course() -> ProgramRequest {
    ProgramRequest {
        program_name: "Forklift Recertification".to_string(),
        tuition_estimate: 155.0,
        cohort_size: 25,
        total_seat_hours: 6.0,
        sections_per_year: 8,
        has_existing_lab_space: true,
        grant_eligible: false,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

#[tokio::test]
async fn licensure_program_regression_fixture() {
    let engine = ViabilityEngine::new(EngineConfig::standard(), FlatNationalWage(62_400.0));
    let bundle = engine
        .evaluate(licensure_program(), ProgramType::InitialLicensure)
        .await
        .expect("program evaluates");

    let year_one = bundle
        .scenarios
        .year(Scenario::Base, 1)
        .expect("year one projected");
    assert_eq!(year_one.enrollment, 17);
    assert_eq!(year_one.revenue.total, 69_000.0);
    assert_eq!(year_one.expenses.instructor_cost, 24_000.0);
    assert_eq!(year_one.expenses.total, 83_433.0);
    assert_eq!(year_one.net_position, -14_433.0);
    assert!((year_one.margin - -0.209).abs() < 0.001);

    assert_eq!(bundle.model, CostModel::FullProgram);
    assert_eq!(bundle.break_even_enrollment, 23);
    assert_eq!(bundle.viability.score, 7);
    assert_eq!(bundle.viability.rationale.len(), 6);
}

#[tokio::test]
async fn continuing_education_regression_fixture() {
    let engine = ViabilityEngine::new(EngineConfig::standard(), OfflineWageService);
    let bundle = engine
        .evaluate(refresher_course(), ProgramType::ContinuingEducation)
        .await
        .expect("course evaluates");

    let year_one = &bundle.scenarios.base[0];
    assert_eq!(year_one.enrollment, 200);
    assert_eq!(year_one.revenue.total, 31_000.0);
    assert!((year_one.expenses.total - 5_295.68).abs() < 1e-6);
    assert!((year_one.net_position - 25_704.32).abs() < 1e-6);
    assert!(year_one.margin > 0.82 && year_one.margin < 0.84);

    assert_eq!(bundle.model, CostModel::ContinuingEducation);
    assert!(bundle.viability.score >= 9);
}

#[tokio::test]
async fn manifest_lists_every_item_once_and_exports() {
    let engine = ViabilityEngine::new(EngineConfig::standard(), OfflineWageService);
    let bundle = engine
        .evaluate(licensure_program(), ProgramType::NonLicensed)
        .await
        .expect("program evaluates");

    let mut items: Vec<&str> = bundle
        .assumptions
        .entries()
        .iter()
        .map(|entry| entry.item.as_str())
        .collect();
    let total = items.len();
    items.sort_unstable();
    items.dedup();
    assert_eq!(items.len(), total);

    let wage = bundle
        .assumptions
        .find("Instructor hourly rate")
        .expect("wage row");
    assert!(wage.source.contains("Last-known national median"));

    let mut csv = Vec::new();
    bundle
        .assumptions
        .write_csv(&mut csv)
        .expect("manifest exports");
    let text = String::from_utf8(csv).expect("utf8 csv");
    assert_eq!(text.lines().count(), total + 1);
    assert!(text.starts_with("item,value,source"));
}

#[tokio::test]
async fn invalid_programs_never_reach_the_models() {
    let engine = ViabilityEngine::new(EngineConfig::standard(), OfflineWageService);
    let mut program = licensure_program();
    program.tuition_estimate = f64::NAN;

    let result = engine
        .evaluate(program, ProgramType::InitialLicensure)
        .await;
    assert!(result.is_err());
}
