//! Derived figures that are never stored authoritatively: project progress
//! from task progress, budget utilization from material usage, per-taluk
//! rollups and status partition counts.
//!
//! Callers pass already-filtered record subsets and receive plain numbers;
//! formatting is left to `ui`.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::status::Labelled;
use crate::domain::{Material, Project, ProjectStatus, Task};

/// Rounded mean of task progress, 0 for an empty task set.
pub fn project_progress<'a, I>(tasks: I) -> u8
where
    I: IntoIterator<Item = &'a Task>,
{
    let (sum, count) = tasks
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), task| {
            (sum + u64::from(task.progress), count + 1)
        });
    if count == 0 {
        return 0;
    }
    rounded_mean(sum, count)
}

pub fn material_cost(material: &Material) -> f64 {
    material.unit_price * material.used as f64
}

/// Sum of `unit_price * used`; no rounding.
pub fn budget_utilization<'a, I>(materials: I) -> f64
where
    I: IntoIterator<Item = &'a Material>,
{
    materials.into_iter().map(material_cost).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub utilized: f64,
    pub available: f64,
}

pub fn budget_summary<'a, P, M>(projects: P, materials: M) -> BudgetSummary
where
    P: IntoIterator<Item = &'a Project>,
    M: IntoIterator<Item = &'a Material>,
{
    let total_budget: f64 = projects.into_iter().map(|project| project.budget).sum();
    let utilized = budget_utilization(materials);
    BudgetSummary {
        total_budget,
        utilized,
        available: total_budget - utilized,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalukRollup {
    pub taluk: String,
    pub projects: usize,
    pub allocated: f64,
    pub utilized: f64,
    pub total_progress: u64,
    pub average_progress: u8,
    pub completed: usize,
    pub in_progress: usize,
}

impl TalukRollup {
    fn empty(taluk: &str) -> Self {
        Self {
            taluk: taluk.to_string(),
            projects: 0,
            allocated: 0.0,
            utilized: 0.0,
            total_progress: 0,
            average_progress: 0,
            completed: 0,
            in_progress: 0,
        }
    }
}

/// Groups projects by taluk in first-seen order. Materials join through
/// their project; materials of projects outside `projects` are ignored.
pub fn rollup_by_taluk<'a, P>(projects: P, materials: &[Material]) -> Vec<TalukRollup>
where
    P: IntoIterator<Item = &'a Project>,
{
    let mut utilization_by_project: HashMap<u64, f64> = HashMap::new();
    for material in materials {
        *utilization_by_project
            .entry(material.project_id)
            .or_insert(0.0) += material_cost(material);
    }

    let mut groups: Vec<TalukRollup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for project in projects {
        let position = *positions.entry(project.taluk.as_str()).or_insert_with(|| {
            groups.push(TalukRollup::empty(&project.taluk));
            groups.len() - 1
        });
        let group = &mut groups[position];
        group.projects += 1;
        group.allocated += project.budget;
        group.utilized += utilization_by_project
            .get(&project.id)
            .copied()
            .unwrap_or(0.0);
        group.total_progress += u64::from(project.progress);
        match project.status {
            ProjectStatus::Completed => group.completed += 1,
            ProjectStatus::InProgress => group.in_progress += 1,
            _ => {}
        }
    }

    for group in &mut groups {
        group.average_progress = if group.projects == 0 {
            0
        } else {
            rounded_mean(group.total_progress, group.projects as u64)
        };
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub label: String,
    pub count: usize,
}

/// Counts per status: every known value in declaration order (zero counts
/// included), then unknown labels in first-seen order.
pub fn status_counts<'a, S, I>(statuses: I) -> Vec<StatusCount>
where
    S: Labelled + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut counts: Vec<StatusCount> = S::known()
        .iter()
        .map(|status| StatusCount {
            status: status.key().to_string(),
            label: status.display_label().to_string(),
            count: 0,
        })
        .collect();

    for status in statuses {
        match counts.iter_mut().find(|entry| entry.status == status.key()) {
            Some(entry) => entry.count += 1,
            None => counts.push(StatusCount {
                status: status.key().to_string(),
                label: status.display_label().to_string(),
                count: 1,
            }),
        }
    }
    counts
}

fn rounded_mean(sum: u64, count: u64) -> u8 {
    let mean = sum as f64 / count as f64;
    mean.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests;
