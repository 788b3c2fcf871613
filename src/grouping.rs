use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::dates::{self, DISTANT_FUTURE};
use crate::types::Issue;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectKey {
    Project(String),
    NoProject,
}

impl ProjectKey {
    pub fn for_issue(issue: &Issue) -> Self {
        match issue.project() {
            Some(project) => Self::Project(project.name.clone()),
            None => Self::NoProject,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Project(name) => Some(name),
            Self::NoProject => None,
        }
    }
}

/// Issues sharing one project for a single render pass.
#[derive(Debug)]
pub struct ProjectBucket<'a> {
    pub key: ProjectKey,
    pub earliest: DateTime<Utc>,
    pub issues: Vec<&'a Issue>,
}

/// Due date when it resolves, otherwise the creation date.
pub fn effective_date(issue: &Issue) -> DateTime<Utc> {
    let due = dates::resolve(issue.due_date());
    if dates::is_known(&due) {
        due
    } else {
        dates::resolve(&issue.created_at)
    }
}

pub fn group(issues: &[Issue]) -> HashMap<ProjectKey, ProjectBucket<'_>> {
    let mut buckets: HashMap<ProjectKey, ProjectBucket<'_>> = HashMap::new();

    for issue in issues {
        let key = ProjectKey::for_issue(issue);
        let target = issue
            .project()
            .and_then(|p| p.target_date.as_deref())
            .map(dates::resolve)
            .unwrap_or(DISTANT_FUTURE);
        let effective = effective_date(issue);

        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| ProjectBucket {
                key,
                earliest: target,
                issues: Vec::new(),
            });
        bucket.issues.push(issue);

        // A known target date is authoritative for its project.
        let candidate = if dates::is_known(&target) {
            target
        } else {
            effective
        };
        if candidate < bucket.earliest {
            bucket.earliest = candidate;
        }
    }

    buckets
}

/// Earliest date first, with the no-project bucket always last.
pub fn order_projects<'a>(
    buckets: HashMap<ProjectKey, ProjectBucket<'a>>,
) -> Vec<ProjectBucket<'a>> {
    let mut ordered: Vec<_> = buckets.into_values().collect();
    ordered.sort_by_key(|b| (b.key == ProjectKey::NoProject, b.earliest));
    ordered
}

pub fn order_issues(issues: &mut [&Issue]) {
    issues.sort_by_cached_key(|issue| effective_date(issue));
}

/// Group, then order both projects and the issues inside each one.
pub fn arrange(issues: &[Issue]) -> Vec<ProjectBucket<'_>> {
    let mut ordered = order_projects(group(issues));
    for bucket in &mut ordered {
        order_issues(&mut bucket.issues);
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;

    fn issue(id: &str, project: Option<(&str, &str, Option<&str>)>, due: Option<&str>) -> Issue {
        Issue {
            id: id.to_string(),
            identifier: id.to_uppercase(),
            title: format!("Issue {id}"),
            due_date: due.map(String::from),
            created_at: "2023-01-01T00:00:00Z".to_string(),
            url: format!("https://linear.app/acme/issue/{id}"),
            project: project.map(|(pid, name, target)| Project {
                id: pid.to_string(),
                name: name.to_string(),
                target_date: target.map(String::from),
            }),
            ..Default::default()
        }
    }

    fn names(buckets: &[ProjectBucket<'_>]) -> Vec<Option<String>> {
        buckets
            .iter()
            .map(|b| b.key.name().map(String::from))
            .collect()
    }

    #[test]
    fn test_group_is_partition() {
        let issues = vec![
            issue("a", Some(("p1", "Alpha", None)), None),
            issue("b", Some(("p2", "Beta", None)), None),
            issue("c", Some(("p1", "Alpha", None)), None),
            issue("d", None, None),
            issue("e", Some(("", "", None)), None),
        ];

        let buckets = group(&issues);

        assert_eq!(buckets.len(), 3);
        let total: usize = buckets.values().map(|b| b.issues.len()).sum();
        assert_eq!(total, issues.len());
        assert_eq!(buckets[&ProjectKey::NoProject].issues.len(), 2);
        assert_eq!(buckets[&ProjectKey::Project("Alpha".into())].issues.len(), 2);
        for original in &issues {
            let hits = buckets
                .values()
                .filter(|b| b.issues.iter().any(|i| i.id == original.id))
                .count();
            assert_eq!(hits, 1, "issue {} should be in exactly one bucket", original.id);
        }
    }

    #[test]
    fn test_project_named_like_sentinel_stays_separate() {
        let issues = vec![
            issue("a", Some(("p1", "__no_project__", None)), None),
            issue("b", None, None),
        ];
        assert_eq!(group(&issues).len(), 2);
    }

    #[test]
    fn test_target_date_wins_over_issue_dates() {
        let issues = vec![
            issue("a", Some(("p1", "Alpha", Some("2023-09-01"))), Some("2023-02-01")),
            issue("b", Some(("p1", "Alpha", Some("2023-09-01"))), None),
        ];
        let buckets = group(&issues);
        let alpha = &buckets[&ProjectKey::Project("Alpha".into())];
        assert_eq!(alpha.earliest, dates::resolve("2023-09-01"));
    }

    #[test]
    fn test_without_target_date_uses_minimum_effective_date() {
        let issues = vec![
            issue("a", Some(("p1", "Alpha", None)), Some("2023-05-10")),
            issue("b", Some(("p1", "Alpha", Some("not a date"))), Some("2023-03-10")),
            issue("c", Some(("p1", "Alpha", None)), None),
        ];
        let buckets = group(&issues);
        let alpha = &buckets[&ProjectKey::Project("Alpha".into())];
        // "c" has no due date and falls back to its creation date.
        assert_eq!(alpha.earliest, dates::resolve("2023-01-01T00:00:00Z"));
    }

    #[test]
    fn test_bucket_without_any_dates_is_unknown() {
        let mut undated = issue("a", Some(("p1", "Alpha", None)), None);
        undated.created_at = String::new();
        let buckets = group(std::slice::from_ref(&undated));
        assert_eq!(buckets[&ProjectKey::Project("Alpha".into())].earliest, DISTANT_FUTURE);
    }

    #[test]
    fn test_no_project_sorts_last_regardless_of_date() {
        let issues = vec![
            issue("a", Some(("p1", "Project A", Some("2023-05-01"))), None),
            issue("b", Some(("p2", "Project B", Some("2023-04-01"))), None),
            issue("c", None, Some("2020-03-01")),
        ];
        let ordered = order_projects(group(&issues));
        assert_eq!(
            names(&ordered),
            vec![Some("Project B".into()), Some("Project A".into()), None]
        );
    }

    #[test]
    fn test_real_projects_non_decreasing_with_unknown_last() {
        let mut undated = issue("z", Some(("p9", "Someday", None)), None);
        undated.created_at = String::new();
        let issues = vec![
            undated,
            issue("a", Some(("p1", "June", Some("2023-06-01"))), None),
            issue("b", Some(("p2", "March", None)), Some("2023-03-01")),
            issue("c", Some(("p3", "April", Some("2023-04-01"))), None),
        ];

        let ordered = order_projects(group(&issues));

        for pair in ordered.windows(2) {
            assert!(pair[0].earliest <= pair[1].earliest);
        }
        assert_eq!(
            names(&ordered),
            vec![
                Some("March".into()),
                Some("April".into()),
                Some("June".into()),
                Some("Someday".into()),
            ]
        );
    }

    #[test]
    fn test_order_issues_by_effective_date() {
        let mut late_created = issue("c", None, None);
        late_created.created_at = "2023-02-15".to_string();
        let issues = vec![
            issue("a", None, Some("2023-03-01")),
            issue("b", None, Some("garbage")),
            late_created,
        ];
        let mut refs: Vec<&Issue> = issues.iter().collect();

        order_issues(&mut refs);

        let ids: Vec<&str> = refs.iter().map(|i| i.id.as_str()).collect();
        // "b" falls back to its creation date, Jan 1.
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_arrange_orders_inside_buckets() {
        let issues = vec![
            issue("late", Some(("p1", "Alpha", None)), Some("2023-08-01")),
            issue("early", Some(("p1", "Alpha", None)), Some("2023-07-01")),
        ];
        let arranged = arrange(&issues);
        assert_eq!(arranged.len(), 1);
        let ids: Vec<&str> = arranged[0].issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
