//! Dashboard aggregates.

use serde::Serialize;

use tonerqc_store::entities::Disposition;
use tonerqc_store::{Repository, ReturnLog, Store};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispositionCounts {
    pub discarded: usize,
    pub stocked: usize,
    pub warranty: usize,
    pub internal_use: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub toner_models: usize,
    pub suppliers: usize,
    pub returned_units: usize,
    pub dispositions: DispositionCounts,
    /// A claim is open until its return invoice is on file.
    pub open_warranty_claims: usize,
    /// Sum of the recovered value over units sent back to stock.
    pub total_recovered_value: f64,
}

/// Compute the dashboard numbers from live repository state.
pub async fn dashboard_stats(store: &Store) -> DashboardStats {
    let returns = store.returns.list().await;

    let mut dispositions = DispositionCounts {
        discarded: 0,
        stocked: 0,
        warranty: 0,
        internal_use: 0,
    };
    let mut total_recovered_value = 0.0;
    for unit in &returns {
        match unit.disposition {
            Disposition::Discard => dispositions.discarded += 1,
            Disposition::Stock => dispositions.stocked += 1,
            Disposition::Warranty => dispositions.warranty += 1,
            Disposition::InternalUse => dispositions.internal_use += 1,
        }
        if let Some(value) = unit.recovered_value {
            total_recovered_value += value;
        }
    }

    let open_warranty_claims = store
        .warranty_claims
        .list()
        .await
        .iter()
        .filter(|claim| claim.return_invoice.is_none())
        .count();

    DashboardStats {
        toner_models: store.toners.list().await.len(),
        suppliers: store.suppliers.list().await.len(),
        returned_units: returns.len(),
        dispositions,
        open_warranty_claims,
        total_recovered_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use tonerqc_store::entities::{NewReturnedUnit, NewToner, NewWarrantyClaim};

    async fn record(store: &Store, disposition: Disposition, value: Option<f64>) {
        store
            .returns
            .record(NewReturnedUnit {
                toner_id: Uuid::new_v4(),
                client_code: "C-001".to_string(),
                branch: "Headquarters - São Paulo".to_string(),
                returned_weight_g: 730.0,
                present_fill_mass_g: 680.0,
                fill_percentage: 80,
                disposition,
                recovered_value: value,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn aggregates_come_from_live_state() {
        let store = Store::new();
        store
            .toners
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

        record(&store, Disposition::Stock, Some(64.0)).await;
        record(&store, Disposition::Stock, Some(32.8)).await;
        record(&store, Disposition::Discard, None).await;

        let mut claim = NewWarrantyClaim {
            items: vec![],
            purchase_invoice: "NF-100".to_string(),
            purchase_invoice_attachment: None,
            supplier_id: None,
            status_id: None,
            shipping_invoice: None,
            shipping_invoice_attachment: None,
            return_invoice: None,
            return_invoice_attachment: None,
            serial_number: None,
            lot: None,
            supplier_ticket: None,
        };
        store.warranty_claims.create(claim.clone()).await.unwrap();
        claim.return_invoice = Some("NF-200".to_string());
        store.warranty_claims.create(claim).await.unwrap();

        let stats = dashboard_stats(&store).await;
        assert_eq!(stats.toner_models, 1);
        assert_eq!(stats.returned_units, 3);
        assert_eq!(stats.dispositions.stocked, 2);
        assert_eq!(stats.dispositions.discarded, 1);
        assert_eq!(stats.open_warranty_claims, 1);
        assert!((stats.total_recovered_value - 96.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_store_yields_zeroes() {
        let stats = dashboard_stats(&Store::new()).await;
        assert_eq!(stats.returned_units, 0);
        assert_eq!(stats.open_warranty_claims, 0);
        assert_eq!(stats.total_recovered_value, 0.0);
    }
}
