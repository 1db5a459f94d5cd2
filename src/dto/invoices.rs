use crate::domain::invoice::{Invoice, InvoiceListItem};
use crate::domain::job::JobListItem;
use crate::domain::payment::{Payment, PaymentTotals};
use crate::domain::types::InvoiceStatus;
use crate::pagination::Paginated;

pub struct InvoicesPageData {
    pub invoices: Paginated<InvoiceListItem>,
    pub status_filter: Option<InvoiceStatus>,
    /// Jobs offered in the add form.
    pub jobs: Vec<JobListItem>,
    pub suggested_number: String,
}

/// Invoice edit page with recorded payments and their totals.
pub struct InvoicePageData {
    pub invoice: Invoice,
    pub jobs: Vec<JobListItem>,
    pub payments: Vec<Payment>,
    pub totals: PaymentTotals,
}
