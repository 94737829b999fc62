use crate::constants::SUBMISSION_FOLDERS;

/// Maps a push event's changed file paths to a known submission folder.
///
/// The static folder list is the outer loop so that priority follows the
/// course's folder ordering, not whatever order the commit diff happens to
/// list files in.
pub fn detect_submission_folder(files: &[String]) -> Option<&'static str> {
    for folder in SUBMISSION_FOLDERS {
        for file in files {
            if file.strip_prefix(folder).is_some_and(|rest| rest.starts_with('/')) {
                return Some(folder);
            }
        }
    }

    None
}

#[cfg(test)]
mod test {
    use super::*;

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_single_folder_match() {
        let changed = files(&["day-02-agentic-framework/solution.py"]);
        assert_eq!(
            detect_submission_folder(&changed),
            Some("day-02-agentic-framework")
        );
    }

    #[test]
    fn test_nested_path_match() {
        let changed = files(&["homework/day-03/src/main.py", "notes.txt"]);
        assert_eq!(detect_submission_folder(&changed), Some("homework/day-03"));
    }

    #[test]
    fn test_no_match() {
        let changed = files(&["README.md", "scratch/day-01-agent-foundations.md"]);
        assert_eq!(detect_submission_folder(&changed), None);
    }

    #[test]
    fn test_prefix_requires_separator() {
        // a sibling folder sharing the prefix must not match
        let changed = files(&["day-05-mvp-extra/solution.py"]);
        assert_eq!(detect_submission_folder(&changed), None);
    }

    #[test]
    fn test_priority_follows_folder_list_not_file_order() {
        // day-01 outranks day-04 regardless of diff ordering
        let changed = files(&[
            "day-04-team-challenge/plan.md",
            "day-01-agent-foundations/agent.py",
        ]);
        assert_eq!(
            detect_submission_folder(&changed),
            Some("day-01-agent-foundations")
        );

        let reversed = files(&[
            "day-01-agent-foundations/agent.py",
            "day-04-team-challenge/plan.md",
        ]);
        assert_eq!(
            detect_submission_folder(&reversed),
            Some("day-01-agent-foundations")
        );
    }

    #[test]
    fn test_empty_file_list() {
        assert_eq!(detect_submission_folder(&[]), None);
    }
}
