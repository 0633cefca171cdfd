//! Groups raw linter output by row.

use crate::issue::{Issue, LineGroup, LineGroups};

/// Groups issues by row, each group ordered by column.
///
/// `None` placeholders are dropped. Issues on line `0` land on row 0.
/// Issues with the same column keep their reported order.
pub fn aggregate<I>(issues: I) -> LineGroups
where
    I: IntoIterator<Item = Option<Issue>>,
{
    let mut groups = LineGroups::new();

    for issue in issues.into_iter().flatten() {
        let row = issue.row();
        match groups.get_mut(&row) {
            Some(group) => group.push(issue),
            None => {
                groups.insert(row, LineGroup::new(issue));
            }
        }
    }

    for group in groups.values_mut() {
        group.sort();
    }

    groups
}

/// Moves every issue up by `added_lines`, undoing lines prepended to the
/// source before it was linted. Issues reported inside the added lines fold
/// onto line 0 (and so onto row 0).
pub fn compensate_line_shift(issues: &mut [Option<Issue>], added_lines: u32) {
    if added_lines == 0 {
        return;
    }

    for issue in issues.iter_mut().flatten() {
        issue.line = issue.line.saturating_sub(added_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn characters(groups: &LineGroups, row: u32) -> Vec<u32> {
        groups[&row].iter().map(|issue| issue.character).collect()
    }

    #[test]
    fn test_nulls_are_dropped() {
        let issues = vec![
            None,
            Some(Issue::new(3, 5, "a")),
            None,
            Some(Issue::new(7, 1, "b")),
            None,
        ];
        let filtered: Vec<_> = issues.iter().flatten().cloned().map(Some).collect();

        assert_eq!(aggregate(issues), aggregate(filtered));
    }

    #[test]
    fn test_line_zero_maps_to_row_zero() {
        let groups = aggregate(vec![Some(Issue::new(0, 1, "Bad option."))]);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_line_zero_and_one_share_row() {
        let groups = aggregate(vec![
            Some(Issue::new(1, 4, "on line one")),
            Some(Issue::new(0, 2, "config")),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(characters(&groups, 0), vec![2, 4]);
    }

    #[test]
    fn test_groups_sorted_by_character() {
        let groups = aggregate(vec![
            Some(Issue::new(3, 5, "five")),
            Some(Issue::new(7, 9, "other line")),
            Some(Issue::new(3, 2, "two")),
        ]);

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![2, 6]);
        assert_eq!(characters(&groups, 2), vec![2, 5]);
        assert_eq!(characters(&groups, 6), vec![9]);
    }

    #[test]
    fn test_ties_keep_reported_order() {
        let groups = aggregate(vec![
            Some(Issue::new(4, 3, "reported first")),
            Some(Issue::new(4, 1, "leftmost")),
            Some(Issue::new(4, 3, "reported second")),
        ]);

        let reasons: Vec<_> = groups[&3].iter().map(|i| i.reason.as_str()).collect();
        assert_eq!(reasons, vec!["leftmost", "reported first", "reported second"]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = Issue::new(2, 8, "a");
        let b = Issue::new(2, 3, "b");
        let c = Issue::new(9, 1, "c");

        let forward = aggregate(vec![Some(a.clone()), Some(b.clone()), Some(c.clone())]);
        let backward = aggregate(vec![Some(c), Some(b), Some(a)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(aggregate(Vec::<Option<Issue>>::new()).is_empty());
        assert!(aggregate(vec![None, None]).is_empty());
    }

    #[test]
    fn test_compensate_line_shift() {
        let mut issues = vec![Some(Issue::new(5, 1, "x")), None, Some(Issue::new(1, 1, "pragma"))];
        compensate_line_shift(&mut issues, 1);

        let groups = aggregate(issues);
        assert!(groups.contains_key(&3));
        assert!(groups.contains_key(&0));
        assert_eq!(groups[&0].first().reason, "pragma");
    }
}
