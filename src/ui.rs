use std::io::{self, IsTerminal};

use crate::dashboard::{
    AdminOverview, BudgetOverview, FeedbackRow, MaterialRow, ProjectDetail, ProjectRow, Report,
    SupervisorOverview, SupervisorRow, TaskRow, WorkerOverview, WorkerRow,
};
use crate::domain::Project;
use crate::metrics::{StatusCount, TalukRollup};
use crate::session::Session;

pub fn print_session(session: &Session) {
    let palette = Palette::auto();
    let user = session.user();
    println!("{}", palette.heading(&session.display_name()));
    println!("{}", palette.dim(&format!("username: {}", user.username)));
    if let Some(taluk) = user.taluk.as_deref() {
        println!("{}", palette.dim(&format!("taluk: {taluk}")));
    }
    if let Some(district) = user.district.as_deref() {
        println!("{}", palette.dim(&format!("district: {district}")));
    }
}

pub fn print_admin_overview(overview: &AdminOverview, currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading("District overview"));
    println!("total projects     {}", overview.total_projects);
    println!("pending approvals  {}", overview.pending_approvals);
    println!("supervisors        {}", overview.supervisors);
    println!("workers            {}", overview.workers);
    println!();
    print_project_rows("Recent projects", &overview.recent_projects, currency);
}

pub fn print_project_rows(title: &str, rows: &[ProjectRow], currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading(title));
    if rows.is_empty() {
        println!("{}", palette.dim("no projects"));
        return;
    }
    for row in rows {
        let project = &row.project;
        println!(
            "{} {} {} {} {}",
            palette.id(&format!("#{}", project.id)),
            palette.status(project.status.as_str(), project.status.label()),
            project.title,
            palette.dim(&format!("{} / {}", project.taluk, row.supervisor_name)),
            format_currency(currency, project.budget)
        );
    }
    println!("{}", palette.dim(&format!("{} project(s)", rows.len())));
}

/// Bare projects, as seen from a supervisor's or worker's own scope.
pub fn print_projects(title: &str, projects: &[&Project], currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading(title));
    if projects.is_empty() {
        println!("{}", palette.dim("no projects"));
        return;
    }
    for project in projects {
        println!(
            "{} {} {} {}% {} {}",
            palette.id(&format!("#{}", project.id)),
            palette.status(project.status.as_str(), project.status.label()),
            project.title,
            project.progress,
            format_currency(currency, project.budget),
            palette.dim(&format!("{} to {}", project.start_date, project.end_date))
        );
    }
}

pub fn print_supervisors(rows: &[SupervisorRow]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Supervisors"));
    if rows.is_empty() {
        println!("{}", palette.dim("no supervisors"));
        return;
    }
    for row in rows {
        println!(
            "{} {} ({}) {} {}",
            palette.id(&format!("#{}", row.id)),
            row.name,
            row.username,
            row.taluk.as_deref().unwrap_or("-"),
            palette.dim(&format!("{} project(s), {} worker(s)", row.projects, row.workers))
        );
    }
}

pub fn print_workers(rows: &[WorkerRow]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Workers"));
    if rows.is_empty() {
        println!("{}", palette.dim("no workers"));
        return;
    }
    for row in rows {
        let contact = [row.email.as_deref(), row.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} ({}) {} {}",
            palette.id(&format!("#{}", row.id)),
            row.name,
            row.username,
            palette.dim(&format!("{} task(s)", row.tasks)),
            palette.dim(&contact)
        );
    }
}

pub fn print_feedback(rows: &[FeedbackRow]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Feedback"));
    if rows.is_empty() {
        println!("{}", palette.dim("no feedback"));
        return;
    }
    for row in rows {
        let item = &row.feedback;
        println!(
            "{} {} {} {}",
            palette.id(&format!("#{}", item.id)),
            palette.status(item.status.as_str(), item.status.label()),
            item.date,
            palette.dim(&format!("{} on {}", row.submitted_by_name, row.project_title))
        );
        println!("  {}", item.message);
        if let Some(response) = item.response.as_deref() {
            let when = item.response_date.as_deref().unwrap_or("-");
            println!("  {} {}", palette.dim(&format!("response ({when}):")), response);
        }
    }
}

pub fn print_tasks(rows: &[TaskRow]) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Tasks"));
    if rows.is_empty() {
        println!("{}", palette.dim("no tasks"));
        return;
    }
    for row in rows {
        let task = &row.task;
        println!(
            "{} {} {} {}% {}",
            palette.id(&format!("#{}", task.id)),
            palette.status(task.status.as_str(), task.status.label()),
            task.title,
            task.progress,
            palette.dim(&format!(
                "{} / {} / {} to {}",
                row.project_title, row.worker_name, task.start_date, task.end_date
            ))
        );
    }
}

pub fn print_materials(rows: &[MaterialRow], currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Materials"));
    if rows.is_empty() {
        println!("{}", palette.dim("no materials"));
        return;
    }
    for row in rows {
        let material = &row.material;
        println!(
            "{} {} {}/{} {} @ {} = {} {}",
            palette.id(&format!("#{}", material.id)),
            material.name,
            material.used,
            material.allocated,
            material.unit,
            format_currency(currency, material.unit_price),
            format_currency(currency, row.cost),
            palette.dim(&row.project_title)
        );
    }
}

pub fn print_budget_overview(overview: &BudgetOverview, currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Budget"));
    println!(
        "total {}  utilized {}  available {}",
        format_currency(currency, overview.summary.total_budget),
        format_currency(currency, overview.summary.utilized),
        format_currency(currency, overview.summary.available)
    );
    println!();
    print_budget_rollup(&overview.taluks, currency);
}

pub fn print_project_detail(detail: &ProjectDetail, currency: &str) {
    let palette = Palette::auto();
    let project = &detail.project.project;
    println!(
        "{} {}",
        palette.heading(&project.title),
        palette.status(project.status.as_str(), project.status.label())
    );
    if !project.description.is_empty() {
        println!("{}", project.description);
    }
    println!("{}", palette.dim(&format!("taluk: {}", project.taluk)));
    println!(
        "{}",
        palette.dim(&format!("supervisor: {}", detail.project.supervisor_name))
    );
    println!(
        "{}",
        palette.dim(&format!("dates: {} to {}", project.start_date, project.end_date))
    );
    println!(
        "budget {}  utilized {}  progress {}%  approved {}",
        format_currency(currency, project.budget),
        format_currency(currency, detail.utilized),
        project.progress,
        if project.approved { "yes" } else { "no" }
    );
    println!();
    print_tasks(&detail.tasks);
    println!();
    print_materials(&detail.materials, currency);
}

pub fn print_supervisor_overview(overview: &SupervisorOverview, currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Supervisor overview"));
    println!("active projects   {}", overview.active_projects);
    println!("total tasks       {}", overview.total_tasks);
    println!("workers           {}", overview.workers);
    println!("pending feedback  {}", overview.pending_feedback);
    println!();
    let projects: Vec<&Project> = overview.projects.iter().collect();
    print_projects("Your projects", &projects, currency);
    println!();
    print_tasks(&overview.recent_tasks);
}

pub fn print_worker_overview(overview: &WorkerOverview) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Worker overview"));
    println!("assigned     {}", overview.total_tasks);
    println!("not started  {}", overview.not_started);
    println!("in progress  {}", overview.in_progress);
    println!("completed    {}", overview.completed);
    println!();
    print_tasks(&overview.tasks);
}

pub fn print_progress_report(report: &Report) {
    let palette = Palette::auto();
    println!("{}", palette.heading(&format!("Taluk progress ({})", report.scope)));
    if report.taluks.is_empty() {
        println!("{}", palette.dim("no projects"));
        return;
    }
    for group in &report.taluks {
        println!(
            "{} {}% {}",
            group.taluk,
            group.average_progress,
            palette.dim(&format!(
                "{} project(s), {} in progress, {} completed",
                group.projects, group.in_progress, group.completed
            ))
        );
    }
}

pub fn print_budget_report(report: &Report, currency: &str) {
    let palette = Palette::auto();
    println!("{}", palette.heading(&format!("Budget ({})", report.scope)));
    println!(
        "total {}  utilized {}  available {}",
        format_currency(currency, report.budget.total_budget),
        format_currency(currency, report.budget.utilized),
        format_currency(currency, report.budget.available)
    );
    println!();
    print_budget_rollup(&report.taluks, currency);
}

pub fn print_status_report(report: &Report) {
    let palette = Palette::auto();
    println!("{}", palette.heading(&format!("Status ({})", report.scope)));
    print_status_counts("Projects", &report.project_status, &palette);
    print_status_counts("Tasks", &report.task_status, &palette);
}

fn print_status_counts(title: &str, counts: &[StatusCount], palette: &Palette) {
    println!("{}", palette.dim(title));
    for entry in counts {
        println!(
            "  {} {}",
            palette.status(&entry.status, &entry.label),
            entry.count
        );
    }
}

fn print_budget_rollup(groups: &[TalukRollup], currency: &str) {
    let palette = Palette::auto();
    if groups.is_empty() {
        println!("{}", palette.dim("no taluks"));
        return;
    }
    for group in groups {
        println!(
            "{} allocated {} utilized {} {}",
            group.taluk,
            format_currency(currency, group.allocated),
            format_currency(currency, group.utilized),
            palette.dim(&format!("{}% used", utilization_percent(group)))
        );
    }
}

fn utilization_percent(group: &TalukRollup) -> u64 {
    if group.allocated <= 0.0 {
        return 0;
    }
    (group.utilized / group.allocated * 100.0).round() as u64
}

/// Indian digit grouping: the last three integer digits, then pairs.
/// Fractions are shown only when non-zero, to two places.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    let mut text = String::new();
    if negative && cents > 0 {
        text.push('-');
    }
    text.push_str(symbol);
    text.push_str(&grouped);
    if fraction > 0 {
        let decimals = format!("{fraction:02}");
        text.push('.');
        text.push_str(decimals.trim_end_matches('0'));
    }
    text
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn auto() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint("1;36", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn id(&self, text: &str) -> String {
        self.paint("1;94", text)
    }

    fn status(&self, key: &str, label: &str) -> String {
        self.paint(status_color_code(key), &format!("[{label}]"))
    }
}

fn status_color_code(key: &str) -> &'static str {
    match key {
        "pending" | "pending-approval" => "33",
        "not-started" => "34",
        "in-progress" => "36",
        "completed" | "resolved" => "32",
        "rejected" => "31",
        _ => "37",
    }
}

#[cfg(test)]
#[path = "ui_tests_ext.rs"]
mod tests;
