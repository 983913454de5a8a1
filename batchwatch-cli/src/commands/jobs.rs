//! Job list command

use anyhow::Result;
use colored::*;

use crate::config::Config;

/// List the watched batch jobs
pub fn list_jobs(config: &Config) -> Result<()> {
    let jobs = config.jobs()?;

    let source = match &config.manifest {
        Some(path) => path.display().to_string(),
        None => "builtin list".to_string(),
    };

    println!(
        "{}",
        format!("{} watched batch job(s) from {}:", jobs.len(), source).bold()
    );
    println!();

    for job in &jobs {
        println!("  {} {}", "▸".cyan(), job.batch_id.bold());
        println!("    Type:         {}", job.category);
        println!("    Description:  {}", job.description.dimmed());
    }

    Ok(())
}
