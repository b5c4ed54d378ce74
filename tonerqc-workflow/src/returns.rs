//! Returned-unit processing.
//!
//! Preview shows the operator what a weigh-in means before anything is
//! persisted; commit runs the same classification, valuates the unit
//! when it goes back to stock, and appends to the return log.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tonerqc_core::{classify_against, recovered_value, FillClassification, PresentationCategory};
use tonerqc_store::entities::{Disposition, NewReturnedUnit, NewToner, ReturnedUnit, Toner};
use tonerqc_store::{Repository, ReturnLog};

use crate::error::WorkflowError;

/// What the operator sees before choosing a disposition. Nothing is
/// persisted at this stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPreview {
    pub toner_id: Uuid,
    pub model: String,
    pub returned_weight_g: f64,
    #[serde(flatten)]
    pub classification: FillClassification,
    /// Value recoverable if the unit were sent to stock. Absent for
    /// out-of-range weigh-ins, where the percentage is not meaningful.
    pub potential_recovered_value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRequest {
    pub toner_id: Uuid,
    pub client_code: String,
    pub branch: String,
    pub returned_weight_g: f64,
    pub disposition: Disposition,
}

pub struct ReturnsProcessor {
    pub(crate) toners: Arc<dyn Repository<Toner, NewToner>>,
    pub(crate) log: Arc<dyn ReturnLog>,
}

impl ReturnsProcessor {
    pub fn new(toners: Arc<dyn Repository<Toner, NewToner>>, log: Arc<dyn ReturnLog>) -> Self {
        ReturnsProcessor { toners, log }
    }

    /// Classify a weigh-in against the catalog without persisting.
    pub async fn preview(
        &self,
        toner_id: Uuid,
        returned_weight_g: f64,
    ) -> Result<ReturnPreview, WorkflowError> {
        let toner = self.toners.get(toner_id).await?;
        self.preview_for(&toner, returned_weight_g)
    }

    pub(crate) fn preview_for(
        &self,
        toner: &Toner,
        returned_weight_g: f64,
    ) -> Result<ReturnPreview, WorkflowError> {
        let classification = classify_against(returned_weight_g, &toner.reference)?;
        let potential_recovered_value = match classification.category {
            PresentationCategory::OutOfRange => None,
            _ => Some(recovered_value(
                classification.fill_percentage,
                toner.reference.sheet_capacity(),
                toner.reference.price_per_sheet(),
            )),
        };
        Ok(ReturnPreview {
            toner_id: toner.id,
            model: toner.reference.model().to_string(),
            returned_weight_g,
            classification,
            potential_recovered_value,
        })
    }

    /// Classify, valuate when the disposition is stock, and persist.
    /// The operator's disposition is accepted as given; the
    /// recommendation is advice, not enforcement.
    pub async fn commit(&self, request: CommitRequest) -> Result<ReturnedUnit, WorkflowError> {
        let toner = self.toners.get(request.toner_id).await?;
        let classification = classify_against(request.returned_weight_g, &toner.reference)?;

        let recovered = match request.disposition {
            Disposition::Stock => Some(recovered_value(
                classification.fill_percentage,
                toner.reference.sheet_capacity(),
                toner.reference.price_per_sheet(),
            )),
            _ => None,
        };

        let unit = self
            .log
            .record(NewReturnedUnit {
                toner_id: toner.id,
                client_code: request.client_code,
                branch: request.branch,
                returned_weight_g: request.returned_weight_g,
                present_fill_mass_g: classification.present_fill_mass_g,
                fill_percentage: classification.fill_percentage,
                disposition: request.disposition,
                recovered_value: recovered,
            })
            .await?;

        info!(
            model = toner.reference.model(),
            fill_percentage = unit.fill_percentage,
            disposition = ?unit.disposition,
            "returned unit recorded"
        );
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonerqc_store::memory::{MemReturns, MemToners};
    use tonerqc_store::StoreError;

    async fn processor_with_sample() -> (ReturnsProcessor, Uuid) {
        let toners = Arc::new(MemToners::new());
        let toner = toners
            .create(NewToner {
                model: "HP CF283A".to_string(),
                empty_weight_g: 50.0,
                full_weight_g: 900.0,
                sheet_capacity: 1600,
                unit_price: 80.0,
                color: "black".to_string(),
                kind: "original".to_string(),
            })
            .await
            .unwrap();
        let processor = ReturnsProcessor::new(toners, Arc::new(MemReturns::new()));
        (processor, toner.id)
    }

    #[tokio::test]
    async fn preview_classifies_and_valuates_without_persisting() {
        let (processor, toner_id) = processor_with_sample().await;
        // 730g returned: 680g present of 850g = 80%.
        let preview = processor.preview(toner_id, 730.0).await.unwrap();
        assert_eq!(preview.classification.fill_percentage, 80);
        assert_eq!(
            preview.classification.category,
            PresentationCategory::Conditional
        );
        // 80% of 1600 sheets = 1280, at R$0.05/sheet.
        assert!((preview.potential_recovered_value.unwrap() - 64.0).abs() < 1e-9);
        assert!(processor.log.list().await.is_empty());
    }

    #[tokio::test]
    async fn preview_of_implausible_weight_has_no_value() {
        let (processor, toner_id) = processor_with_sample().await;
        let preview = processor.preview(toner_id, 1000.0).await.unwrap();
        assert_eq!(
            preview.classification.category,
            PresentationCategory::OutOfRange
        );
        assert!(preview.potential_recovered_value.is_none());
    }

    #[tokio::test]
    async fn commit_valuates_only_stock_dispositions() {
        let (processor, toner_id) = processor_with_sample().await;

        let stocked = processor
            .commit(CommitRequest {
                toner_id,
                client_code: "C-001".to_string(),
                branch: "Headquarters - São Paulo".to_string(),
                returned_weight_g: 730.0,
                disposition: Disposition::Stock,
            })
            .await
            .unwrap();
        assert_eq!(stocked.fill_percentage, 80);
        assert!((stocked.recovered_value.unwrap() - 64.0).abs() < 1e-9);

        let discarded = processor
            .commit(CommitRequest {
                toner_id,
                client_code: "C-002".to_string(),
                branch: "Headquarters - São Paulo".to_string(),
                returned_weight_g: 90.0,
                disposition: Disposition::Discard,
            })
            .await
            .unwrap();
        assert_eq!(discarded.fill_percentage, 5);
        assert!(discarded.recovered_value.is_none());

        assert_eq!(processor.log.list().await.len(), 2);
    }

    #[tokio::test]
    async fn commit_persists_exactly_the_classifier_numbers() {
        let (processor, toner_id) = processor_with_sample().await;
        let preview = processor.preview(toner_id, 390.0).await.unwrap();
        let unit = processor
            .commit(CommitRequest {
                toner_id,
                client_code: "C-003".to_string(),
                branch: "Branch - Rio de Janeiro".to_string(),
                returned_weight_g: 390.0,
                disposition: Disposition::InternalUse,
            })
            .await
            .unwrap();
        assert_eq!(unit.fill_percentage, preview.classification.fill_percentage);
        assert!(
            (unit.present_fill_mass_g - preview.classification.present_fill_mass_g).abs() < 1e-9
        );
    }

    #[tokio::test]
    async fn unknown_toner_is_a_not_found() {
        let (processor, _) = processor_with_sample().await;
        let err = processor.preview(Uuid::new_v4(), 500.0).await.unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Store(StoreError::NotFound { entity: "toner", .. })
        ));
    }
}
