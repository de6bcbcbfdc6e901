use crate::library::logger::interface::Logger;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub namespace: Option<String>,
    pub message: String,
}

/// Keeps every line in memory. Namespaced children share the parent's buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerMemory {
    namespace: Option<String>,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl LoggerMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(LogEntry {
                level,
                namespace: self.namespace.clone(),
                message: message.to_string(),
            });
    }
}

impl Logger for LoggerMemory {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Info, message);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Warn, message);
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(LogLevel::Error, message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerMemory {
            namespace: Some(new_namespace),
            entries: self.entries.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_share_entries() {
        let logger = LoggerMemory::new();
        let child = logger.with_namespace("cache").with_namespace("fs");

        child.warn("disk full").unwrap();

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].namespace.as_deref(), Some("cache:fs"));
        assert!(logger.contains(LogLevel::Warn, "disk full"));
    }
}
