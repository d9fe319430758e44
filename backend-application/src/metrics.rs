use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::ImportSummary;

#[derive(Debug, Default)]
pub struct Metrics {
    import_requests: AtomicU64,
    import_records: AtomicU64,
    import_failures: AtomicU64,
    import_skipped_rows: AtomicU64,
    people_added: AtomicU64,
    export_requests: AtomicU64,
}

impl Metrics {
    pub fn record_import(&self, summary: &ImportSummary) {
        self.import_requests.fetch_add(1, Ordering::Relaxed);
        self.import_records
            .fetch_add(summary.succeeded as u64, Ordering::Relaxed);
        self.import_failures
            .fetch_add(summary.failed as u64, Ordering::Relaxed);
        self.import_skipped_rows
            .fetch_add(summary.skipped as u64, Ordering::Relaxed);
        self.people_added
            .fetch_add(summary.people_added as u64, Ordering::Relaxed);
    }

    pub fn record_export(&self) {
        self.export_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.import_requests.load(Ordering::Relaxed);
        let records = self.import_records.load(Ordering::Relaxed);
        let failures = self.import_failures.load(Ordering::Relaxed);
        let skipped = self.import_skipped_rows.load(Ordering::Relaxed);
        let people = self.people_added.load(Ordering::Relaxed);
        let exports = self.export_requests.load(Ordering::Relaxed);

        format!(
            "# TYPE inventory_import_requests_total counter\n\
inventory_import_requests_total {}\n\
# TYPE inventory_import_records_total counter\n\
inventory_import_records_total {}\n\
# TYPE inventory_import_failures_total counter\n\
inventory_import_failures_total {}\n\
# TYPE inventory_import_skipped_rows_total counter\n\
inventory_import_skipped_rows_total {}\n\
# TYPE inventory_people_added_total counter\n\
inventory_people_added_total {}\n\
# TYPE inventory_export_requests_total counter\n\
inventory_export_requests_total {}\n",
            requests, records, failures, skipped, people, exports
        )
    }
}
