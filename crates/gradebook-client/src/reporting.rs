//! Class statistics and report exports.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use gradebook_core::model::{GradedRecord, StudentWithMarks};
use gradebook_core::statistics::{aggregate, ClassAggregate};
use gradebook_core::traits::Gateway;
use gradebook_report::html::{generate_html, ReportMeta};
use gradebook_report::{csv, export_filename, write_report, ExportKind};

use crate::{ClientError, Status};

/// Fetches or computes class statistics and writes exports to disk.
pub struct ReportingCoordinator {
    gateway: Arc<dyn Gateway>,
    output_dir: PathBuf,
    export_date: Option<NaiveDate>,
    statistics: Option<ClassAggregate>,
    status: Status,
}

impl ReportingCoordinator {
    /// Exports are written into `output_dir`, which is created on demand.
    pub fn new(gateway: Arc<dyn Gateway>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            output_dir: output_dir.into(),
            export_date: None,
            statistics: None,
            status: Status::default(),
        }
    }

    /// Pin the date used in export filenames instead of today's.
    pub fn with_export_date(mut self, date: NaiveDate) -> Self {
        self.export_date = Some(date);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Statistics from the last successful fetch.
    pub fn statistics(&self) -> Option<&ClassAggregate> {
        self.statistics.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub async fn fetch_statistics(&mut self, course_id: &str) -> Result<ClassAggregate, ClientError> {
        self.status.begin("fetch_statistics");
        let outcome = match self.gateway.course_statistics(course_id).await {
            Ok(response) => {
                self.statistics = Some(response.data.clone());
                Ok(response.data)
            }
            Err(err) => Err(ClientError::from(err)),
        };
        self.status.settle("fetch_statistics", outcome)
    }

    /// Aggregate the graded entries of a roster. Students without marks are
    /// left out.
    pub fn compute_local(&self, entries: &[StudentWithMarks]) -> ClassAggregate {
        let records: Vec<GradedRecord> = entries.iter().filter_map(|e| e.graded()).collect();
        aggregate(&records)
    }

    /// Write the marks table as CSV.
    pub fn export_csv(
        &mut self,
        course_name: &str,
        entries: &[StudentWithMarks],
    ) -> Result<PathBuf, ClientError> {
        self.export("export_csv", course_name, ExportKind::Marks, &csv::marks_csv(entries))
    }

    /// Write class statistics as CSV.
    pub fn export_statistics_csv(
        &mut self,
        course_name: &str,
        statistics: &ClassAggregate,
    ) -> Result<PathBuf, ClientError> {
        self.export(
            "export_statistics_csv",
            course_name,
            ExportKind::Statistics,
            &csv::statistics_csv(statistics),
        )
    }

    /// Write the printable HTML report.
    pub fn export_html(
        &mut self,
        meta: &ReportMeta,
        entries: &[StudentWithMarks],
    ) -> Result<PathBuf, ClientError> {
        self.export(
            "export_html",
            &meta.course_name,
            ExportKind::Report,
            &generate_html(meta, entries),
        )
    }

    fn export(
        &mut self,
        action: &str,
        course_name: &str,
        kind: ExportKind,
        contents: &str,
    ) -> Result<PathBuf, ClientError> {
        self.status.begin(action);
        let date = self
            .export_date
            .unwrap_or_else(|| Local::now().date_naive());
        let path = self.output_dir.join(export_filename(course_name, kind, date));
        let outcome = write_report(&path, contents)
            .map(|()| {
                info!(path = %path.display(), "export written");
                path
            })
            .map_err(ClientError::from);
        self.status.settle(action, outcome)
    }
}
