use chrono::{NaiveDate, NaiveTime};
use renovation_crm::domain::customer::{CustomerDetails, NewCustomer, UpdateCustomer};
use renovation_crm::domain::estimate::{EstimateDetails, NewEstimate, NewEstimateItem, UpdateEstimate};
use renovation_crm::domain::invoice::{InvoiceDetails, NewInvoice, UpdateInvoice};
use renovation_crm::domain::job::{Job, JobDetails, NewJob, UpdateJob};
use renovation_crm::domain::lead::{Lead, LeadDetails, NewLead};
use renovation_crm::domain::material::NewMaterial;
use renovation_crm::domain::payment::NewPayment;
use renovation_crm::domain::profile::{NewProfile, Profile};
use renovation_crm::domain::site_visit::{
    NewSiteVisit, SiteVisitDetails, UpdateSiteVisit, visit_datetime,
};
use renovation_crm::domain::types::{
    CustomerName, DocumentNumber, Email, EstimateId, EstimateStatus, InvoiceId, InvoiceStatus,
    ItemDescription, JobId, JobStatus, LeadId, LeadStatus, MaterialName, Notes, PaymentMethod,
    ProfileRole, ProjectName,
};
use renovation_crm::repository::errors::RepositoryError;
use renovation_crm::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, EstimateReader,
    EstimateWriter, InvoiceListQuery, InvoiceReader, InvoiceWriter, JobListQuery, JobReader,
    JobWriter, LeadListQuery, LeadReader, LeadWriter, MaterialReader, MaterialWriter,
    PaymentReader, PaymentWriter, ProfileWriter, SiteVisitListQuery, SiteVisitReader,
    SiteVisitWriter, StatsReader,
};
use rust_decimal::Decimal;

mod common;

fn profile(repo: &DieselRepository, email: &str) -> Profile {
    let new_profile = NewProfile::new(
        Email::new(email).unwrap(),
        Some("Test User".into()),
        ProfileRole::default(),
    );
    repo.ensure_profile(&new_profile).unwrap()
}

fn customer_details(name: &str, email: &str) -> CustomerDetails {
    CustomerDetails {
        name: CustomerName::new(name).unwrap(),
        email: Email::new(email).unwrap(),
        phone: None,
        address: None,
        city: Some("Springfield".into()),
        state: None,
        zip_code: None,
        notes: None,
    }
}

fn lead_details(project: &str, status: LeadStatus) -> LeadDetails {
    LeadDetails {
        customer_id: None,
        project_name: ProjectName::new(project).unwrap(),
        description: None,
        status,
        estimated_value: Some(Decimal::new(1500000, 2)),
    }
}

fn estimate_details(
    lead_id: LeadId,
    number: &str,
    items: Vec<NewEstimateItem>,
) -> EstimateDetails {
    EstimateDetails::new(
        lead_id,
        DocumentNumber::new(number).unwrap(),
        EstimateStatus::Draft,
        Some(Decimal::new(100, 0)),
        None,
        None,
        None,
        None,
        items,
    )
}

fn item(description: &str, quantity: i64, unit_price: i64) -> NewEstimateItem {
    NewEstimateItem::new(
        ItemDescription::new(description).unwrap(),
        Decimal::new(quantity, 0),
        Decimal::new(unit_price, 0),
        None,
    )
}

fn job_details(estimate_id: EstimateId, number: &str, status: JobStatus) -> JobDetails {
    JobDetails {
        estimate_id,
        job_number: DocumentNumber::new(number).unwrap(),
        status,
        start_date: None,
        end_date: None,
        actual_start_date: None,
        actual_end_date: None,
        notes: None,
    }
}

/// Creates a won lead with one estimate and a job built from it.
fn lead_with_job(repo: &DieselRepository, owner: &Profile, job_number: &str) -> (Lead, Job) {
    let lead = repo
        .create_lead(&NewLead::new(owner.id, lead_details("Roof", LeadStatus::Won)))
        .unwrap();
    let estimate = repo
        .create_estimate(&NewEstimate::new(
            owner.id,
            estimate_details(lead.id, "EST-001", vec![]),
        ))
        .unwrap();
    let job = repo
        .create_job(&NewJob::new(
            owner.id,
            job_details(estimate.id, job_number, JobStatus::Scheduled),
        ))
        .unwrap();
    (lead, job)
}

fn invoice_details(job_id: JobId, number: &str) -> InvoiceDetails {
    InvoiceDetails {
        job_id,
        invoice_number: DocumentNumber::new(number).unwrap(),
        status: InvoiceStatus::Sent,
        total_amount: Decimal::new(1000, 0),
        tax_amount: None,
        due_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        paid_date: None,
        notes: None,
    }
}

fn payment(owner: &Profile, invoice_id: InvoiceId, amount: i64) -> NewPayment {
    NewPayment {
        user_id: owner.id,
        invoice_id,
        amount: Decimal::new(amount, 0),
        payment_method: PaymentMethod::Check,
        payment_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        reference_number: None,
        notes: None,
    }
}

fn visit_details(lead_id: LeadId, hour: u32) -> SiteVisitDetails {
    let date = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
    SiteVisitDetails {
        lead_id,
        visit_date: visit_datetime(date, NaiveTime::from_hms_opt(hour, 0, 0)),
        notes: None,
        measurements: Notes::parse("12x14 ft"),
    }
}

fn material(owner: &Profile, job_id: JobId, name: &str, quantity: i64, cost: &str) -> NewMaterial {
    NewMaterial::new(
        owner.id,
        job_id,
        MaterialName::new(name).unwrap(),
        Decimal::new(quantity, 0),
        None,
        cost.parse().unwrap(),
        None,
        None,
        None,
    )
}

#[test]
fn test_ensure_profile_is_idempotent() {
    let test_db = common::TestDb::new("test_ensure_profile_is_idempotent.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = profile(&repo, "owner@example.com");
    let second = profile(&repo, "owner@example.com");

    assert_eq!(first.id, second.id);
    assert_eq!(first.role, ProfileRole::default());
}

#[test]
fn test_customer_crud_is_scoped_to_owner() {
    let test_db = common::TestDb::new("test_customer_crud_is_scoped_to_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");

    let alice = repo
        .create_customer(&NewCustomer::new(
            owner.id,
            customer_details("Alice", "alice@example.com"),
        ))
        .unwrap();
    repo.create_customer(&NewCustomer::new(
        owner.id,
        customer_details("Bob", "bob@example.com"),
    ))
    .unwrap();

    let (total, items) = repo.list_customers(CustomerListQuery::new(owner.id)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].name.as_str(), "Alice");

    let (search_total, search_items) = repo
        .list_customers(CustomerListQuery::new(owner.id).search("bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name.as_str(), "Bob");

    let (paged_total, paged) = repo
        .list_customers(CustomerListQuery::new(owner.id).paginate(2, 1))
        .unwrap();
    assert_eq!(paged_total, 2);
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].name.as_str(), "Bob");

    // Another user sees nothing and cannot touch the row.
    assert!(repo.get_customer_by_id(alice.id, other.id).unwrap().is_none());
    let (other_total, _) = repo.list_customers(CustomerListQuery::new(other.id)).unwrap();
    assert_eq!(other_total, 0);
    assert!(matches!(
        repo.delete_customer(alice.id, other.id),
        Err(RepositoryError::NotFound)
    ));

    let updated = repo
        .update_customer(
            alice.id,
            owner.id,
            &UpdateCustomer::new(customer_details("Alice Smith", "alice@example.com")),
        )
        .unwrap();
    assert_eq!(updated.name.as_str(), "Alice Smith");

    repo.delete_customer(alice.id, owner.id).unwrap();
    assert!(repo.get_customer_by_id(alice.id, owner.id).unwrap().is_none());
}

#[test]
fn test_deleting_customer_keeps_leads() {
    let test_db = common::TestDb::new("test_deleting_customer_keeps_leads.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");

    let customer = repo
        .create_customer(&NewCustomer::new(
            owner.id,
            customer_details("Alice", "alice@example.com"),
        ))
        .unwrap();
    let mut details = lead_details("Kitchen remodel", LeadStatus::New);
    details.customer_id = Some(customer.id);
    let lead = repo.create_lead(&NewLead::new(owner.id, details)).unwrap();

    let (_, items) = repo.list_leads(LeadListQuery::new(owner.id)).unwrap();
    assert_eq!(items[0].customer_name.as_deref(), Some("Alice"));

    repo.delete_customer(customer.id, owner.id).unwrap();

    let lead = repo.get_lead_by_id(lead.id, owner.id).unwrap().unwrap();
    assert_eq!(lead.customer_id, None);
}

#[test]
fn test_lead_status_filter() {
    let test_db = common::TestDb::new("test_lead_status_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");

    repo.create_lead(&NewLead::new(owner.id, lead_details("Deck", LeadStatus::New)))
        .unwrap();
    repo.create_lead(&NewLead::new(owner.id, lead_details("Bathroom", LeadStatus::Won)))
        .unwrap();

    let (total, items) = repo
        .list_leads(LeadListQuery::new(owner.id).status(LeadStatus::Won))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].lead.project_name.as_str(), "Bathroom");
}

#[test]
fn test_estimate_items_are_replaced_on_update() {
    let test_db = common::TestDb::new("test_estimate_items_are_replaced_on_update.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let lead = repo
        .create_lead(&NewLead::new(owner.id, lead_details("Kitchen", LeadStatus::New)))
        .unwrap();

    let estimate = repo
        .create_estimate(&NewEstimate::new(
            owner.id,
            estimate_details(lead.id, "EST-001", vec![item("Tiles", 10, 5), item("Grout", 2, 10)]),
        ))
        .unwrap();
    assert_eq!(estimate.total_amount, Decimal::new(170, 0));
    assert_eq!(repo.list_estimate_items(estimate.id, owner.id).unwrap().len(), 2);

    let updated = repo
        .update_estimate(
            estimate.id,
            owner.id,
            &UpdateEstimate::new(estimate_details(lead.id, "EST-001", vec![item("Paint", 3, 20)])),
        )
        .unwrap();
    assert_eq!(updated.total_amount, Decimal::new(160, 0));

    let items = repo.list_estimate_items(estimate.id, owner.id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].description.as_str(), "Paint");
    assert_eq!(items[0].total_price, Decimal::new(60, 0));

    assert_eq!(repo.list_estimates_by_lead(lead.id, owner.id).unwrap().len(), 1);
}

#[test]
fn test_duplicate_estimate_number_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_estimate_number_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let lead = repo
        .create_lead(&NewLead::new(owner.id, lead_details("Kitchen", LeadStatus::New)))
        .unwrap();

    repo.create_estimate(&NewEstimate::new(
        owner.id,
        estimate_details(lead.id, "EST-001", vec![]),
    ))
    .unwrap();
    let duplicate = repo.create_estimate(&NewEstimate::new(
        owner.id,
        estimate_details(lead.id, "EST-001", vec![]),
    ));

    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));
    assert_eq!(repo.count_estimates(owner.id).unwrap(), 1);
}

#[test]
fn test_payments_keep_invoice_paid_amount_in_sync() {
    let test_db = common::TestDb::new("test_payments_keep_invoice_paid_amount_in_sync.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let (lead, job) = lead_with_job(&repo, &owner, "JOB-001");
    let invoice = repo
        .create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-001")))
        .unwrap();
    assert_eq!(invoice.paid_amount, Decimal::ZERO);

    let first = repo.create_payment(&payment(&owner, invoice.id, 300)).unwrap();
    repo.create_payment(&payment(&owner, invoice.id, 200)).unwrap();

    let invoice_after = repo.get_invoice_by_id(invoice.id, owner.id).unwrap().unwrap();
    assert_eq!(invoice_after.paid_amount, Decimal::new(500, 0));
    assert_eq!(invoice_after.status, InvoiceStatus::Sent);

    repo.delete_payment(first.id, invoice.id, owner.id).unwrap();
    let invoice_after = repo.get_invoice_by_id(invoice.id, owner.id).unwrap().unwrap();
    assert_eq!(invoice_after.paid_amount, Decimal::new(200, 0));
    assert_eq!(repo.list_payments_by_invoice(invoice.id, owner.id).unwrap().len(), 1);

    // Deleting the lead cascades down to the invoice.
    repo.delete_lead(lead.id, owner.id).unwrap();
    assert!(repo.get_invoice_by_id(invoice.id, owner.id).unwrap().is_none());
    assert_eq!(repo.count_invoices(owner.id).unwrap(), 0);
}

#[test]
fn test_invoice_update_keeps_paid_amount_from_payments() {
    let test_db = common::TestDb::new("test_invoice_update_keeps_paid_amount_from_payments.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let (_, job) = lead_with_job(&repo, &owner, "JOB-001");
    let invoice = repo
        .create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-001")))
        .unwrap();
    repo.create_payment(&payment(&owner, invoice.id, 300)).unwrap();

    let mut details = invoice_details(job.id, "INV-001");
    details.total_amount = Decimal::new(1200, 0);
    let updated = repo
        .update_invoice(invoice.id, owner.id, &UpdateInvoice::new(details))
        .unwrap();

    let paid: Decimal = repo
        .list_payments_by_invoice(invoice.id, owner.id)
        .unwrap()
        .iter()
        .map(|payment| payment.amount)
        .sum();
    assert_eq!(updated.paid_amount, paid);
    assert_eq!(updated.paid_amount, Decimal::new(300, 0));
    assert_eq!(updated.remaining(), Decimal::new(900, 0));
}

#[test]
fn test_payment_delete_requires_its_invoice() {
    let test_db = common::TestDb::new("test_payment_delete_requires_its_invoice.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let (_, job) = lead_with_job(&repo, &owner, "JOB-001");
    let first = repo
        .create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-001")))
        .unwrap();
    let second = repo
        .create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-002")))
        .unwrap();
    let recorded = repo.create_payment(&payment(&owner, first.id, 250)).unwrap();

    assert!(matches!(
        repo.delete_payment(recorded.id, second.id, owner.id),
        Err(RepositoryError::NotFound)
    ));
    let first_after = repo.get_invoice_by_id(first.id, owner.id).unwrap().unwrap();
    assert_eq!(first_after.paid_amount, Decimal::new(250, 0));
}

#[test]
fn test_invoices_are_scoped_to_owner() {
    let test_db = common::TestDb::new("test_invoices_are_scoped_to_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");
    let (_, job) = lead_with_job(&repo, &owner, "JOB-001");
    let invoice = repo
        .create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-001")))
        .unwrap();

    let (total, items) = repo.list_invoices(InvoiceListQuery::new(owner.id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].job_number, "JOB-001");
    assert_eq!(items[0].remaining, Decimal::new(1000, 0));

    let (other_total, _) = repo.list_invoices(InvoiceListQuery::new(other.id)).unwrap();
    assert_eq!(other_total, 0);
    assert!(repo.get_invoice_by_id(invoice.id, other.id).unwrap().is_none());
    assert!(repo.list_invoices_by_job(job.id, other.id).unwrap().is_empty());
    assert!(matches!(
        repo.update_invoice(
            invoice.id,
            other.id,
            &UpdateInvoice::new(invoice_details(job.id, "INV-009")),
        ),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_invoice(invoice.id, other.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.create_payment(&payment(&other, invoice.id, 10)).is_err());

    let duplicate =
        repo.create_invoice(&NewInvoice::new(owner.id, invoice_details(job.id, "INV-001")));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    repo.delete_invoice(invoice.id, owner.id).unwrap();
    assert_eq!(repo.count_invoices(owner.id).unwrap(), 0);
}

#[test]
fn test_site_visits_are_scoped_to_owner() {
    let test_db = common::TestDb::new("test_site_visits_are_scoped_to_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");
    let lead = repo
        .create_lead(&NewLead::new(owner.id, lead_details("Basement", LeadStatus::New)))
        .unwrap();

    let visit = repo
        .create_site_visit(&NewSiteVisit::new(owner.id, visit_details(lead.id, 10)))
        .unwrap();

    let (total, items) = repo.list_site_visits(SiteVisitListQuery::new(owner.id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].project_name, "Basement");
    assert_eq!(repo.list_site_visits_by_lead(lead.id, owner.id).unwrap().len(), 1);

    let (other_total, _) = repo.list_site_visits(SiteVisitListQuery::new(other.id)).unwrap();
    assert_eq!(other_total, 0);
    assert!(repo.get_site_visit_by_id(visit.id, other.id).unwrap().is_none());
    assert!(repo.list_site_visits_by_lead(lead.id, other.id).unwrap().is_empty());
    assert!(matches!(
        repo.update_site_visit(
            visit.id,
            other.id,
            &UpdateSiteVisit::new(visit_details(lead.id, 14)),
        ),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_site_visit(visit.id, other.id),
        Err(RepositoryError::NotFound)
    ));

    let updated = repo
        .update_site_visit(visit.id, owner.id, &UpdateSiteVisit::new(visit_details(lead.id, 14)))
        .unwrap();
    assert_eq!(updated.visit_date.time(), NaiveTime::from_hms_opt(14, 0, 0).unwrap());

    repo.delete_site_visit(visit.id, owner.id).unwrap();
    assert!(repo.get_site_visit_by_id(visit.id, owner.id).unwrap().is_none());
}

#[test]
fn test_jobs_are_scoped_to_owner() {
    let test_db = common::TestDb::new("test_jobs_are_scoped_to_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");
    let (_, job) = lead_with_job(&repo, &owner, "JOB-001");

    let (total, items) = repo.list_jobs(JobListQuery::new(owner.id)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].job.job_number.as_str(), "JOB-001");
    let (filtered, _) = repo
        .list_jobs(JobListQuery::new(owner.id).status(JobStatus::Completed))
        .unwrap();
    assert_eq!(filtered, 0);

    let (other_total, _) = repo.list_jobs(JobListQuery::new(other.id)).unwrap();
    assert_eq!(other_total, 0);
    assert!(repo.get_job_by_id(job.id, other.id).unwrap().is_none());
    assert!(matches!(
        repo.update_job(
            job.id,
            other.id,
            &UpdateJob::new(job_details(job.estimate_id, "JOB-001", JobStatus::Completed)),
        ),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_job(job.id, other.id),
        Err(RepositoryError::NotFound)
    ));

    let duplicate = repo.create_job(&NewJob::new(
        owner.id,
        job_details(job.estimate_id, "JOB-001", JobStatus::Scheduled),
    ));
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));
    assert_eq!(repo.count_jobs(owner.id).unwrap(), 1);

    let updated = repo
        .update_job(
            job.id,
            owner.id,
            &UpdateJob::new(job_details(job.estimate_id, "JOB-001", JobStatus::InProgress)),
        )
        .unwrap();
    assert_eq!(updated.status, JobStatus::InProgress);

    repo.delete_job(job.id, owner.id).unwrap();
    assert_eq!(repo.count_jobs(owner.id).unwrap(), 0);
}

#[test]
fn test_materials_are_scoped_to_job_and_owner() {
    let test_db = common::TestDb::new("test_materials_are_scoped_to_job_and_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");
    let (lead, job) = lead_with_job(&repo, &owner, "JOB-001");
    let estimate = repo.list_estimates_by_lead(lead.id, owner.id).unwrap().remove(0);
    let second_job = repo
        .create_job(&NewJob::new(
            owner.id,
            job_details(estimate.id, "JOB-002", JobStatus::Scheduled),
        ))
        .unwrap();

    let drywall = repo
        .create_material(&material(&owner, job.id, "Drywall", 24, "12.75"))
        .unwrap();
    repo.create_material(&material(&owner, job.id, "Screws", 2, "8.50"))
        .unwrap();
    assert_eq!(drywall.total_cost, Decimal::new(30600, 2));

    let materials = repo.list_materials_by_job(job.id, owner.id).unwrap();
    assert_eq!(materials.len(), 2);
    assert!(repo.list_materials_by_job(second_job.id, owner.id).unwrap().is_empty());
    assert!(repo.list_materials_by_job(job.id, other.id).unwrap().is_empty());

    assert!(matches!(
        repo.delete_material(drywall.id, job.id, other.id),
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_material(drywall.id, second_job.id, owner.id),
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(repo.list_materials_by_job(job.id, owner.id).unwrap().len(), 2);

    repo.delete_material(drywall.id, job.id, owner.id).unwrap();
    let remaining = repo.list_materials_by_job(job.id, owner.id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name.as_str(), "Screws");

    // Deleting the job removes its materials.
    repo.delete_job(job.id, owner.id).unwrap();
    assert!(repo.list_materials_by_job(job.id, owner.id).unwrap().is_empty());
}

#[test]
fn test_stats_are_scoped_to_owner() {
    let test_db = common::TestDb::new("test_stats_are_scoped_to_owner.db");
    let repo = DieselRepository::new(test_db.pool());
    let owner = profile(&repo, "owner@example.com");
    let other = profile(&repo, "other@example.com");

    repo.create_customer(&NewCustomer::new(
        owner.id,
        customer_details("Alice", "alice@example.com"),
    ))
    .unwrap();
    repo.create_lead(&NewLead::new(owner.id, lead_details("Deck", LeadStatus::New)))
        .unwrap();
    repo.create_lead(&NewLead::new(owner.id, lead_details("Patio", LeadStatus::New)))
        .unwrap();
    repo.create_lead(&NewLead::new(other.id, lead_details("Fence", LeadStatus::Lost)))
        .unwrap();

    assert_eq!(repo.count_customers(owner.id).unwrap(), 1);
    assert_eq!(repo.count_customers(other.id).unwrap(), 0);
    assert_eq!(
        repo.lead_status_counts(owner.id).unwrap(),
        vec![(LeadStatus::New, 2)]
    );

    let recent = repo.recent_leads(owner.id, 1).unwrap();
    assert_eq!(recent.len(), 1);
    assert!(repo.list_invoice_figures(owner.id).unwrap().is_empty());
}
