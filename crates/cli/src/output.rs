// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

use clap::ValueEnum;
use corral_engine::StatusSnapshot;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_status(snapshots: &[StatusSnapshot], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = snapshots
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "name": s.name,
                        "status": format!("{:?}", s.status).to_uppercase(),
                        "pid": s.pid,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            if snapshots.is_empty() {
                println!("no services registered");
                return Ok(());
            }
            let name_width = snapshots.iter().map(|s| s.name.len()).max().unwrap_or(4).max(4);
            println!("{:<width$}  STATUS     PID", "NAME", width = name_width);
            for snapshot in snapshots {
                let pid = snapshot.pid.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<width$}  {:<9}  {}",
                    snapshot.name,
                    format!("{:?}", snapshot.status).to_uppercase(),
                    pid,
                    width = name_width
                );
            }
        }
    }
    Ok(())
}
