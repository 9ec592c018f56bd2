use sitekit_validator::{ValidationReport, validate_site};
use std::path::PathBuf;

use super::project::Project;

fn print_validation(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }
    if !report.warnings.is_empty() {
        println!("\n⚠ {} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }
    if !report.errors.is_empty() {
        println!("\n✗ {} error(s):", report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
}

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let project = Project::load(&path)?;
    println!("✓ site.json valid");
    println!("✓ export.toml valid");
    println!("  Site: {}", project.site.site_title());

    let report = validate_site(&project.site, &project.store);
    print_validation(&report);

    if !report.is_ok() {
        anyhow::bail!(
            "Validation failed with {} error(s)",
            report.errors.len()
        );
    }
    println!("\n✓ Ready to export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_validate_fails_on_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.json"),
            r#"{"theme": {"primaryColor": "not-a-color"}}"#,
        )
        .unwrap();
        let err = run(dir.path().to_path_buf()).await.unwrap_err();
        assert!(err.to_string().starts_with("Validation failed"));
    }

    #[tokio::test]
    async fn test_validate_passes_clean_site() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.json"),
            r#"{"headerData": {"siteName": "Ok"}, "contactData": {"email": "a@b.test"}}"#,
        )
        .unwrap();
        run(dir.path().to_path_buf()).await.unwrap();
    }
}
