use crate::models::{DeviceTable, Table};

/// Tables of the relational backend, in creation order.
pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        Self { tables }
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    /// Drop statements, last created table first.
    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![Box::new(DeviceTable)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedTable(&'static str);

    impl Table for NamedTable {
        fn create(&self) -> String {
            format!("CREATE TABLE {};", self.0)
        }

        fn dispose(&self) -> String {
            format!("DROP TABLE {};", self.0)
        }
    }

    #[test]
    fn test_dispose_reverses_creation_order() {
        let manager = SchemaManager::new(vec![
            Box::new(NamedTable("devices")),
            Box::new(NamedTable("pump_events")),
        ]);

        assert_eq!(
            manager.create_schema(),
            vec!["CREATE TABLE devices;", "CREATE TABLE pump_events;"]
        );
        assert_eq!(
            manager.dispose_schema(),
            vec!["DROP TABLE pump_events;", "DROP TABLE devices;"]
        );
    }

    #[test]
    fn test_default_schema_creates_devices() {
        let manager = SchemaManager::default();
        let statements = manager.create_schema();

        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("CREATE TABLE IF NOT EXISTS devices"));
        assert_eq!(manager.dispose_schema(), vec!["DROP TABLE IF EXISTS devices;"]);
    }
}
