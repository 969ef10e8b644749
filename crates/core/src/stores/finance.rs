//! Finance store
//!
//! Statistics are a guarded read with a zeroed fallback; records follow the
//! same refetch-after-write rule as the resource stores, re-querying with the
//! last filter used.

use std::sync::Arc;

use erpwire_domain::{
    FinanceFilter, FinanceRecord, FinanceStatistics, IntoResourceId, ResourceId, Result,
};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, error, info};

use super::loading::LoadingFlag;
use super::ports::FinanceApi;

#[derive(Debug, Default)]
struct FinanceState {
    statistics: FinanceStatistics,
    records: Vec<FinanceRecord>,
    filter: FinanceFilter,
}

pub struct FinanceStore<A: FinanceApi> {
    api: Arc<A>,
    state: RwLock<FinanceState>,
    loading: LoadingFlag,
}

impl<A: FinanceApi> FinanceStore<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api, state: RwLock::new(FinanceState::default()), loading: LoadingFlag::default() }
    }

    /// Fetch aggregated statistics.
    ///
    /// While another fetch is in flight the current value is returned without
    /// a request. A failed fetch is logged and replaced by zeroed statistics;
    /// this never returns an error.
    pub async fn statistics(&self) -> FinanceStatistics {
        let Some(_loading) = self.loading.try_begin() else {
            debug!("finance fetch in flight, returning current statistics");
            return self.current_statistics();
        };

        let statistics = match self.api.statistics().await {
            Ok(statistics) => statistics,
            Err(err) => {
                error!(error = %err, kind = err.label(), "finance statistics fetch failed, using zeroed statistics");
                FinanceStatistics::default()
            }
        };
        self.state.write().statistics = statistics.clone();
        statistics
    }

    /// Fetch finance records for `filter` and remember it for re-fetches.
    pub async fn records(&self, filter: FinanceFilter) -> Result<Vec<FinanceRecord>> {
        let _loading = self.loading.begin();
        let records = self.api.records(&filter).await?;
        info!(records = records.len(), "finance records refreshed");

        let mut state = self.state.write();
        state.records = records.clone();
        state.filter = filter;
        Ok(records)
    }

    pub async fn create_record(&self, record: &FinanceRecord) -> Result<Value> {
        let response = self.api.create_record(record).await?;
        self.refetch().await?;
        Ok(response)
    }

    pub async fn update_record(
        &self,
        id: impl IntoResourceId + Send,
        record: &FinanceRecord,
    ) -> Result<Value> {
        let id = ResourceId::parse(id)?;
        let response = self.api.update_record(id, record).await?;
        self.refetch().await?;
        Ok(response)
    }

    pub async fn delete_record(&self, id: impl IntoResourceId + Send) -> Result<Value> {
        let id = ResourceId::parse(id)?;
        let response = self.api.delete_record(id).await?;
        self.refetch().await?;
        Ok(response)
    }

    pub fn current_statistics(&self) -> FinanceStatistics {
        self.state.read().statistics.clone()
    }

    pub fn current_records(&self) -> Vec<FinanceRecord> {
        self.state.read().records.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn reset(&self) {
        *self.state.write() = FinanceState::default();
    }

    async fn refetch(&self) -> Result<()> {
        let filter = self.state.read().filter.clone();
        self.records(filter).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use erpwire_domain::ErpError;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use super::*;

    #[derive(Default)]
    struct FakeFinanceApi {
        statistics: Mutex<Option<FinanceStatistics>>,
        records: Mutex<Vec<FinanceRecord>>,
        statistics_calls: Mutex<usize>,
        filters: Mutex<Vec<FinanceFilter>>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl FinanceApi for FakeFinanceApi {
        async fn statistics(&self) -> Result<FinanceStatistics> {
            *self.statistics_calls.lock() += 1;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.statistics
                .lock()
                .clone()
                .ok_or(ErpError::Server { detail: "statistics unavailable".into() })
        }

        async fn records(&self, filter: &FinanceFilter) -> Result<Vec<FinanceRecord>> {
            self.filters.lock().push(filter.clone());
            Ok(self.records.lock().clone())
        }

        async fn create_record(&self, record: &FinanceRecord) -> Result<Value> {
            let mut record = record.clone();
            record.id = Some(ResourceId::new(self.records.lock().len() as i64 + 1));
            self.records.lock().push(record);
            Ok(Value::Null)
        }

        async fn update_record(&self, _id: ResourceId, _record: &FinanceRecord) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn delete_record(&self, id: ResourceId) -> Result<Value> {
            self.records.lock().retain(|r| r.id != Some(id));
            Ok(Value::Null)
        }
    }

    fn sample_statistics() -> FinanceStatistics {
        FinanceStatistics {
            total_profit: 120.0,
            total_turnover: 900.0,
            total_order_quantity: 12,
            average_profit: 10.0,
            average_turnover: 75.0,
        }
    }

    #[tokio::test]
    async fn statistics_failure_falls_back_to_zeroes() {
        let store = FinanceStore::new(Arc::new(FakeFinanceApi::default()));

        let statistics = store.statistics().await;

        assert_eq!(statistics, FinanceStatistics::default());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn statistics_success_is_cached() {
        let api = FakeFinanceApi::default();
        *api.statistics.lock() = Some(sample_statistics());
        let store = FinanceStore::new(Arc::new(api));

        assert_eq!(store.statistics().await, sample_statistics());
        assert_eq!(store.current_statistics(), sample_statistics());
    }

    #[tokio::test]
    async fn statistics_skips_request_while_loading() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeFinanceApi { gate: Some(gate.clone()), ..Default::default() });
        *api.statistics.lock() = Some(sample_statistics());
        let store = Arc::new(FinanceStore::new(api.clone()));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.statistics().await }
        });
        while !store.is_loading() {
            tokio::task::yield_now().await;
        }

        let second = store.statistics().await;
        assert_eq!(second, FinanceStatistics::default());

        gate.notify_one();
        assert_eq!(first.await.unwrap(), sample_statistics());
        assert_eq!(*api.statistics_calls.lock(), 1);
    }

    #[tokio::test]
    async fn record_mutations_refetch_with_last_filter() {
        let api = Arc::new(FakeFinanceApi::default());
        let store = FinanceStore::new(api.clone());
        let filter = FinanceFilter { period: Some("month".into()), ..Default::default() };
        store.records(filter.clone()).await.unwrap();

        store.create_record(&FinanceRecord::default()).await.unwrap();
        assert_eq!(store.current_records().len(), 1);

        store.delete_record(1).await.unwrap();
        assert!(store.current_records().is_empty());
        assert_eq!(*api.filters.lock(), vec![filter.clone(), filter.clone(), filter]);
    }

    #[tokio::test]
    async fn reset_restores_zeroed_state() {
        let api = FakeFinanceApi::default();
        *api.statistics.lock() = Some(sample_statistics());
        let store = FinanceStore::new(Arc::new(api));
        store.statistics().await;

        store.reset();

        assert_eq!(store.current_statistics(), FinanceStatistics::default());
        assert!(store.current_records().is_empty());
    }
}
