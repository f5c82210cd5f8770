mod bootstrap;

use anyhow::{Context, Result};
use finance_core::settings::{Settings, DATA_FILE_ENV};
use finance_data::aggregator::HistoryTotals;
use finance_data::flows::money_flows;
use finance_runtime::session::DashboardSession;
use finance_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        settings.json,
    )?;

    tracing::info!("Finance Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let data_path = bootstrap::discover_data_path(settings.file.clone(), &cwd)
        .with_context(|| {
            format!(
                "no data file found: pass --file, set {DATA_FILE_ENV}, or place {} in {}",
                bootstrap::DEFAULT_DATA_FILES.join(" or "),
                cwd.display()
            )
        })?;
    tracing::info!("Data file: {}", data_path.display());

    let mut session = DashboardSession::open(&data_path)
        .with_context(|| format!("cannot open {}", data_path.display()))?;

    if let Some(month) = settings.month.as_deref() {
        session
            .select_month_str(month)
            .with_context(|| format!("cannot open month {month}"))?;
    }

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&json_report(&session))?);
        return Ok(());
    }

    let app = App::new(&settings.theme, ViewMode::from_name(&settings.view), session);
    app.run().context("dashboard terminated with an error")?;

    tracing::info!("Finance Dashboard exiting");
    Ok(())
}

/// Selected month summary, its money flows and the all-month totals.
fn json_report(session: &DashboardSession) -> serde_json::Value {
    let summary = session.summary();
    let flows = summary.as_ref().map(money_flows).unwrap_or_default();
    let totals = HistoryTotals::from_summaries(&session.history());

    serde_json::json!({
        "file": session.path().display().to_string(),
        "months": session.months(),
        "summary": summary,
        "flows": flows,
        "totals": totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSV: &str = "\
Catégorie,Type,2024-01,2024-02
Salaire,Entrée,2800,2900
Loyer,Sortie,950,950
Livret A,Épargne,,300
";

    #[test]
    fn test_json_report_for_latest_month() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("finances.csv");
        std::fs::write(&path, CSV).unwrap();

        let session = DashboardSession::open(&path).unwrap();
        let report = json_report(&session);

        assert_eq!(report["months"], serde_json::json!(["2024-01", "2024-02"]));
        assert_eq!(report["summary"]["month"], "2024-02");
        assert_eq!(report["totals"]["months"], 2);
        let flows = report["flows"].as_array().unwrap();
        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0]["source"], "Salaire");
    }

    #[test]
    fn test_json_report_for_selected_month() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("finances.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut session = DashboardSession::open(&path).unwrap();
        session.select_month_str("2024-01").unwrap();
        let report = json_report(&session);

        assert_eq!(report["summary"]["month"], "2024-01");
        // Livret A has no cell in January.
        assert_eq!(report["flows"].as_array().unwrap().len(), 2);
    }
}
