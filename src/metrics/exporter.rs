use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Writes snapshots in the Prometheus text exposition format.
///
/// Write errors are dropped: exporting is best effort and must never affect
/// the cache.
///
/// ```
/// use lrukit::metrics::exporter::PrometheusTextExporter;
/// use lrukit::metrics::snapshot::LruMetricsSnapshot;
/// use lrukit::metrics::traits::MetricsExporter;
///
/// let exporter = PrometheusTextExporter::new("lru", Vec::new());
/// exporter.export(&LruMetricsSnapshot { get_hits: 2, ..Default::default() });
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("lru_get_hits_total 2"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, s: &LruMetricsSnapshot) {
        self.counter("get_calls_total", s.get_calls);
        self.counter("get_hits_total", s.get_hits);
        self.counter("get_misses_total", s.get_misses);
        self.counter("insert_calls_total", s.insert_calls);
        self.counter("insert_updates_total", s.insert_updates);
        self.counter("insert_new_total", s.insert_new);
        self.counter("evict_calls_total", s.evict_calls);
        self.counter("evicted_entries_total", s.evicted_entries);
        self.counter("remove_calls_total", s.remove_calls);
        self.counter("remove_found_total", s.remove_found);
        self.counter("clear_calls_total", s.clear_calls);
        self.counter("pop_lru_calls_total", s.pop_lru_calls);
        self.counter("pop_lru_found_total", s.pop_lru_found);
        self.counter("touch_calls_total", s.touch_calls);
        self.counter("touch_found_total", s.touch_found);
        self.counter("peek_calls_total", s.peek_calls);
        self.counter("peek_found_total", s.peek_found);
        self.counter("peek_lru_calls_total", s.peek_lru_calls);
        self.counter("peek_lru_found_total", s.peek_lru_found);
        self.counter("recency_rank_calls_total", s.recency_rank_calls);
        self.counter("recency_rank_found_total", s.recency_rank_found);
        self.counter("recency_rank_scan_steps_total", s.recency_rank_scan_steps);
        self.gauge("cache_len", s.cache_len);
        self.gauge("capacity", s.capacity);
    }
}
