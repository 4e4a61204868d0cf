use crate::core::aggregator;
use crate::core::chart::{ChartOptions, ChartRenderer};
use crate::core::loader;
use crate::core::report::ReportRenderer;
use crate::core::{AggregationResult, ConfigProvider, Pipeline, Storage, Table};
use crate::utils::error::Result;

/// Sales report pipeline wired to a storage backend and a configuration.
pub struct SalesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    report: ReportRenderer,
    chart: ChartRenderer,
}

impl<S: Storage, C: ConfigProvider> SalesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let report = ReportRenderer::new(config.report_title(), config.currency_symbol());
        let (width, height) = config.chart_size();
        let chart = ChartRenderer::new(ChartOptions {
            title: config.chart_title().to_string(),
            width,
            height,
            bar_color: config.bar_color().to_string(),
            ..ChartOptions::for_currency(config.currency_symbol())
        });

        Self {
            storage,
            config,
            report,
            chart,
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SalesPipeline<S, C> {
    fn load(&self) -> Result<Table> {
        let path = self.config.input_path();
        tracing::info!("Loading and cleaning data from {}", path);
        let data = self.storage.read_file(path)?;
        loader::load_and_clean(data.as_slice())
    }

    fn analyze(&self, table: &Table) -> Result<AggregationResult> {
        tracing::info!("Analyzing {} rows", table.len());
        aggregator::analyze(table)
    }

    fn report(&self, table: &Table, result: &AggregationResult) -> Result<String> {
        tracing::info!("Generating report");
        let text = self.report.render(table, result)?;
        self.report
            .save(&self.storage, &text, self.config.report_file())
    }

    fn chart(&self, table: &Table) -> Result<String> {
        tracing::info!("Creating dashboard chart");
        self.chart
            .render_chart(table, &self.storage, self.config.chart_file())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub(crate) struct MockStorage {
        files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
        read_only: bool,
    }

    impl MockStorage {
        pub(crate) fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        pub(crate) fn read_only(mut self) -> Self {
            self.read_only = true;
            self
        }

        pub(crate) fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }

        pub(crate) fn file_count(&self) -> usize {
            self.files.borrow().len()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| EtlError::SourceNotFound {
                    path: path.to_string(),
                })
        }

        fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
            if self.read_only {
                return Err(EtlError::WriteFailure {
                    path: name.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "read-only storage",
                    ),
                });
            }
            self.files
                .borrow_mut()
                .insert(name.to_string(), data.to_vec());
            Ok(())
        }

        fn output_location(&self, name: &str) -> String {
            format!("mock://{}", name)
        }
    }

    pub(crate) struct MockConfig {
        pub(crate) input: String,
        pub(crate) currency: String,
    }

    impl MockConfig {
        pub(crate) fn new(input: &str) -> Self {
            Self {
                input: input.to_string(),
                currency: "£".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            "."
        }

        fn report_file(&self) -> &str {
            "report.txt"
        }

        fn chart_file(&self) -> &str {
            "chart.svg"
        }

        fn report_title(&self) -> &str {
            "TEST REPORT"
        }

        fn currency_symbol(&self) -> &str {
            &self.currency
        }
    }

    pub(crate) const SAMPLE_CSV: &str = "Date,Product,Sales\n\
        2024-01-01,A,100\n\
        2024-01-01,A,100\n\
        2024-01-02,B,50\n";

    #[test]
    fn test_load_reads_from_storage() {
        let storage = MockStorage::with_file("in.csv", SAMPLE_CSV);
        let pipeline = SalesPipeline::new(storage, MockConfig::new("in.csv"));

        let table = pipeline.load().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_source() {
        let pipeline = SalesPipeline::new(MockStorage::default(), MockConfig::new("in.csv"));
        assert!(matches!(
            pipeline.load(),
            Err(EtlError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_report_and_chart_are_written() {
        let storage = MockStorage::with_file("in.csv", SAMPLE_CSV);
        let mut config = MockConfig::new("in.csv");
        config.currency = "$".to_string();
        let pipeline = SalesPipeline::new(storage.clone(), config);

        let table = pipeline.load().unwrap();
        let result = pipeline.analyze(&table).unwrap();
        let report_path = pipeline.report(&table, &result).unwrap();
        let chart_path = pipeline.chart(&table).unwrap();

        assert_eq!(report_path, "mock://report.txt");
        assert_eq!(chart_path, "mock://chart.svg");

        let report = storage.get_file("report.txt").unwrap();
        assert!(report.starts_with("TEST REPORT\n"));
        assert!(report.contains("- Total Sales: $150.00"));
        assert!(report.contains("- Average Daily Sales: $75.00"));
        assert!(report.contains("- Top Performing Product: A"));

        let chart = storage.get_file("chart.svg").unwrap();
        assert!(chart.contains("Sales ($)"));
        assert_eq!(storage.file_count(), 3);
    }

    #[test]
    fn test_write_failure_surfaces() {
        let storage = MockStorage::with_file("in.csv", SAMPLE_CSV).read_only();
        let pipeline = SalesPipeline::new(storage, MockConfig::new("in.csv"));

        let table = pipeline.load().unwrap();
        let result = pipeline.analyze(&table).unwrap();
        assert!(matches!(
            pipeline.report(&table, &result),
            Err(EtlError::WriteFailure { .. })
        ));
    }
}
