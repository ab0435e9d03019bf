//! Basic example demonstrating the Infrakit API client.
//!
//! Run with:
//! ```
//! USERNAME=you PASSWORD=secret MODE=production cargo run --example basic
//! ```

use futures_util::StreamExt;
use infrakit::{Alert, Credentials, InfrakitClient, List, Project};

#[tokio::main]
async fn main() -> infrakit::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Infrakit client...");
    let client = InfrakitClient::new(Credentials::from_env()?)?;
    println!("Connected to: {}", client.base_url());

    // List projects
    println!("\n--- Listing Projects ---");
    let projects = Project::list(&client, &Default::default()).await?;
    println!("Found {} projects", projects.len());

    for project in &projects {
        let archived = if project.archived { " (archived)" } else { "" };
        println!("  - {} [{}]{}", project.name, project.uuid, archived);
    }

    // Walk the first project's folder tree
    if let Some(project) = projects.first() {
        println!("\n--- Folders of {} ---", project.name);
        let folders = project.folders(&client, 1).await?;
        for folder in &folders {
            println!("  - {} ({} children)", folder.name, folder.folders.len());
        }

        // Stream the first records of the project export
        println!("\n--- Export preview ---");
        let mut export = project.export(&client).await?;
        let mut shown = 0;
        while let Some(record) = export.next().await {
            println!("  {}", record?);
            shown += 1;
            if shown == 5 {
                break;
            }
        }
    }

    // List alerts
    println!("\n--- Alerts ---");
    let alerts = Alert::list(&client, &()).await?;
    for alert in &alerts {
        println!("  - #{}: {}", alert.id, alert.message);
    }

    println!("\nDone!");
    Ok(())
}
