//! Unit tests for instruction history

use incant::history::HistoryLog;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn test_sessions_share_one_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");

        {
            let mut first = HistoryLog::open(&path, 100).unwrap();
            first.append("list files").unwrap();
            first.append("show ip").unwrap();
        }
        {
            let mut second = HistoryLog::open(&path, 100).unwrap();
            assert_eq!(second.len(), 2);
            second.append("disk usage").unwrap();
        }

        let log = HistoryLog::open(&path, 100).unwrap();
        let inputs: Vec<&str> = log.entries().map(|e| e.raw_input.as_str()).collect();
        assert_eq!(inputs, vec!["list files", "show ip", "disk usage"]);
    }

    #[test]
    fn test_file_lines_are_json_objects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");

        let mut log = HistoryLog::open(&path, 100).unwrap();
        log.append("list files").unwrap();
        log.append("sysinfo --json").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("timestamp").is_some());
            assert!(value.get("raw_input").and_then(|v| v.as_str()).is_some());
        }
    }

    #[test]
    fn test_raw_input_is_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");
        let messy = "  LIST   files \t please ";

        let mut log = HistoryLog::open(&path, 100).unwrap();
        log.append(messy).unwrap();

        // what the user typed, not what the resolver saw
        let reloaded = HistoryLog::open(&path, 100).unwrap();
        let entry = reloaded.entries().next().unwrap();
        assert_eq!(entry.raw_input, messy);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let dir = TempDir::new().unwrap();
        let mut log = HistoryLog::open(dir.path().join("history"), 100).unwrap();
        for i in 0..5 {
            log.append(&format!("entry {}", i)).unwrap();
        }

        let stamps: Vec<_> = log.entries().map(|e| e.timestamp).collect();
        for pair in stamps.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_reopen_with_smaller_window_keeps_newest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");

        let mut log = HistoryLog::open(&path, 100).unwrap();
        for i in 0..10 {
            log.append(&format!("entry {}", i)).unwrap();
        }

        let small = HistoryLog::open(&path, 4).unwrap();
        let inputs: Vec<&str> = small.entries().map(|e| e.raw_input.as_str()).collect();
        assert_eq!(inputs, vec!["entry 6", "entry 7", "entry 8", "entry 9"]);

        // the file itself still holds everything
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 10);
    }

    #[test]
    fn test_search_after_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");

        let mut log = HistoryLog::open(&path, 100).unwrap();
        log.append("list files").unwrap();
        log.append("show files in /tmp").unwrap();
        log.append("ping host").unwrap();

        let reloaded = HistoryLog::open(&path, 100).unwrap();
        let matches = reloaded.search_regex("files").unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|e| e.raw_input.contains("files")));
    }

    #[test]
    fn test_recent_zero_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut log = HistoryLog::open(dir.path().join("history"), 100).unwrap();
        log.append("something").unwrap();

        assert_eq!(log.recent(0).count(), 0);
    }

    #[test]
    fn test_garbage_between_sessions_does_not_poison_the_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");

        let mut log = HistoryLog::open(&path, 100).unwrap();
        log.append("before").unwrap();

        // another process scribbled a malformed line
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{\"timestamp\": \"not a timestamp\"}\n");
        fs::write(&path, content).unwrap();

        let mut log = HistoryLog::open(&path, 100).unwrap();
        assert_eq!(log.len(), 1);
        log.append("after").unwrap();

        let reloaded = HistoryLog::open(&path, 100).unwrap();
        let inputs: Vec<&str> = reloaded.entries().map(|e| e.raw_input.as_str()).collect();
        assert_eq!(inputs, vec!["before", "after"]);
    }
}
