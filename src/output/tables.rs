use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::records::{PipelineRun, Project};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Run states as reported by the pipelines API.
pub fn color_coded_status_cell(status: &str) -> Cell {
    match status {
        "completed" => Cell::new(status).fg(TableColor::Green),
        "inProgress" | "notStarted" | "unknown" => Cell::new(status).fg(TableColor::Yellow),
        "canceling" => Cell::new(status).fg(TableColor::Red),
        _ => Cell::new(status),
    }
}

pub fn color_coded_visibility_cell(visibility: &str) -> Cell {
    match visibility {
        "public" => Cell::new(visibility).fg(TableColor::Yellow),
        "private" => Cell::new(visibility).fg(TableColor::Green),
        _ => Cell::new(visibility),
    }
}

pub fn projects_table(projects: &[Project]) -> Table {
    let mut table = create_table();
    table.set_header(cyan_header(&[
        "Name",
        "ID",
        "State",
        "Visibility",
        "Revision",
        "Last Update",
        "Description",
    ]));

    for project in projects {
        table.add_row(vec![
            Cell::new(&project.name),
            Cell::new(&project.id),
            Cell::new(&project.state),
            color_coded_visibility_cell(&project.visibility),
            Cell::new(project.revision),
            Cell::new(&project.last_update_time),
            Cell::new(&project.description),
        ]);
    }

    table
}

pub fn run_table(run: &PipelineRun) -> Table {
    let mut table = create_table();
    table.set_header(cyan_header(&["Field", "Value"]));

    table.add_row(vec![Cell::new("Run"), Cell::new(run.run_id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&run.name)]);
    table.add_row(vec![
        Cell::new("Status"),
        color_coded_status_cell(&run.status),
    ]);
    table.add_row(vec![Cell::new("Pipeline"), Cell::new(run.pipeline_id)]);
    table.add_row(vec![
        Cell::new("Project"),
        Cell::new(format!("{}/{}", run.organization, run.project)),
    ]);
    table.add_row(vec![
        Cell::new("Branch"),
        Cell::new(run.branch.as_deref().unwrap_or("(default)")),
    ]);
    table.add_row(vec![Cell::new("Created"), Cell::new(&run.created_date)]);
    table.add_row(vec![Cell::new("URL"), Cell::new(&run.url)]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_table_lists_every_project() {
        let projects = vec![
            Project {
                name: "Alpha".to_string(),
                visibility: "private".to_string(),
                ..Project::default()
            },
            Project {
                name: "Beta".to_string(),
                revision: 42,
                ..Project::default()
            },
        ];

        let rendered = projects_table(&projects).to_string();
        assert!(rendered.contains("Alpha"));
        assert!(rendered.contains("Beta"));
        assert!(rendered.contains("42"));
        assert!(rendered.contains("Visibility"));
    }

    #[test]
    fn test_run_table_shows_default_branch_marker() {
        let run = PipelineRun {
            pipeline_id: 3,
            project: "Web".to_string(),
            organization: "contoso".to_string(),
            branch: None,
            run_id: 77,
            name: "20241015.2".to_string(),
            status: "inProgress".to_string(),
            url: "https://dev.azure.com/contoso/Web/_build/results?buildId=77".to_string(),
            created_date: String::new(),
        };

        let rendered = run_table(&run).to_string();
        assert!(rendered.contains("contoso/Web"));
        assert!(rendered.contains("(default)"));
        assert!(rendered.contains("77"));
    }
}
