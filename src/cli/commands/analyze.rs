//! Analyze Command
//!
//! One-shot analysis run from the command line. Prints the same
//! response record the HTTP endpoint returns, as JSON or as a readable
//! text report.

use console::style;

use crate::config::ConfigLoader;
use crate::pipeline::AnalysisPipeline;
use crate::types::{AnalysisResponse, Priority, Result};

pub async fn run(locator: &str, format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let pipeline = AnalysisPipeline::new(config);

    let response = pipeline.analyze(locator).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_report(&response);
    }

    Ok(())
}

fn print_report(response: &AnalysisResponse) {
    let overview = &response.overview;

    println!(
        "\n{}",
        style(format!("Repository: {}", overview.repository_name))
            .bold()
            .underlined()
    );
    println!("  Files:     {}", overview.total_files);
    if !overview.primary_languages.is_empty() {
        println!("  Languages: {}", overview.primary_languages.join(", "));
    }
    println!("  Structure: {}", response.architecture.structure_type);

    if let Some(description) = &overview.description {
        println!("\n{}", description);
    }

    if let Some(features) = &overview.key_features {
        println!("\n{}", style("Key features").bold());
        for feature in features {
            println!("  {} {}", style("•").cyan(), feature);
        }
    }

    if let Some(patterns) = &response.architecture.patterns {
        println!("\n{}", style("Architecture patterns").bold());
        for pattern in patterns {
            println!("  {} {}", style("•").cyan(), pattern);
        }
    }

    if !response.recommendations.is_empty() {
        println!("\n{}", style("Recommendations").bold());
        for rec in &response.recommendations {
            let priority = match rec.priority {
                Priority::High => style("high").red(),
                Priority::Medium => style("medium").yellow(),
                Priority::Low => style("low").green(),
            };
            println!("  [{}] {}", priority, rec.title);
            println!("        {}", rec.description);
        }
    }

    println!("\n{}", style("Folder structure").bold());
    println!("{}", response.architecture.folder_structure);

    println!("\n{}", style("Diagram (mermaid)").bold());
    println!("{}", response.visualization.mermaid);
}
