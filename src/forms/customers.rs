use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{CustomerDetails, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerName, Email, Notes, PhoneNumber, UserId};
use crate::forms::{FormError, blank_to_none};

/// Form data for creating or editing a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub notes: String,
}

pub struct CustomerPayload {
    pub details: CustomerDetails,
}

impl TryFrom<CustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let phone = blank_to_none(&form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;

        Ok(Self {
            details: CustomerDetails {
                name: CustomerName::new(form.name).map_err(|_| FormError::InvalidName)?,
                email: Email::new(form.email).map_err(|_| FormError::InvalidEmail)?,
                phone,
                address: blank_to_none(&form.address),
                city: blank_to_none(&form.city),
                state: blank_to_none(&form.state),
                zip_code: blank_to_none(&form.zip_code),
                notes: Notes::parse(form.notes),
            },
        })
    }
}

impl CustomerPayload {
    pub fn into_new(self, user_id: UserId) -> NewCustomer {
        NewCustomer::new(user_id, self.details)
    }

    pub fn into_update(self) -> UpdateCustomer {
        UpdateCustomer::new(self.details)
    }
}

/// Multipart upload of a customers CSV file.
#[derive(MultipartForm)]
pub struct UploadCustomersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// One CSV row; headers match the customer columns.
#[derive(Debug, Deserialize)]
struct CustomerRecord {
    name: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    zip_code: String,
    #[serde(default)]
    notes: String,
}

impl From<CustomerRecord> for CustomerForm {
    fn from(record: CustomerRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            phone: record.phone,
            address: record.address,
            city: record.city,
            state: record.state,
            zip_code: record.zip_code,
            notes: record.notes,
        }
    }
}

/// Reads customers from CSV with a header row, failing on the first bad row.
pub fn parse_customers_csv<R: Read>(
    reader: R,
    user_id: UserId,
) -> Result<Vec<NewCustomer>, FormError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut customers = Vec::new();
    for (index, record) in rdr.deserialize::<CustomerRecord>().enumerate() {
        let line = index + 2;
        let record = record.map_err(|err| FormError::Csv(format!("line {line}: {err}")))?;
        let payload = CustomerPayload::try_from(CustomerForm::from(record))
            .map_err(|err| FormError::Csv(format!("line {line}: {err}")))?;
        customers.push(payload.into_new(user_id));
    }

    Ok(customers)
}

impl UploadCustomersForm {
    pub fn parse(&mut self, user_id: UserId) -> Result<Vec<NewCustomer>, FormError> {
        parse_customers_csv(self.csv.file.as_file_mut(), user_id)
    }
}
