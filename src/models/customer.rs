//! Diesel models for customers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerDetails, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::{
    CustomerId, CustomerName, Email, Notes, PhoneNumber, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub zip_code: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            user_id: UserId::try_from(customer.user_id)?,
            name: CustomerName::new(customer.name)?,
            email: Email::new(customer.email)?,
            phone: customer.phone.map(PhoneNumber::new).transpose()?,
            address: customer.address,
            city: customer.city,
            state: customer.state,
            zip_code: customer.zip_code,
            notes: customer.notes.and_then(Notes::parse),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        let CustomerDetails {
            name,
            email,
            phone,
            address,
            city,
            state,
            zip_code,
            notes,
        } = &customer.details;
        Self {
            user_id: customer.user_id.get(),
            name: name.as_str(),
            email: email.as_str(),
            phone: phone.as_ref().map(|p| p.as_str()),
            address: address.as_deref(),
            city: city.as_deref(),
            state: state.as_deref(),
            zip_code: zip_code.as_deref(),
            notes: notes.as_ref().map(|n| n.as_str()),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        let details = &customer.details;
        Self {
            name: details.name.as_str(),
            email: details.email.as_str(),
            phone: details.phone.as_ref().map(|p| p.as_str()),
            address: details.address.as_deref(),
            city: details.city.as_deref(),
            state: details.state.as_deref(),
            zip_code: details.zip_code.as_deref(),
            notes: details.notes.as_ref().map(|n| n.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn details() -> CustomerDetails {
        CustomerDetails {
            name: CustomerName::new("Dana Reyes").unwrap(),
            email: Email::new("dana@example.com").unwrap(),
            phone: None,
            address: Some("12 Elm St".into()),
            city: Some("Springfield".into()),
            state: None,
            zip_code: Some("62704".into()),
            notes: Notes::parse("Prefers email"),
        }
    }

    #[test]
    fn from_domain_new_customer() {
        let domain = DomainNewCustomer::new(UserId::new(5).unwrap(), details());
        let new: NewCustomer = (&domain).into();
        assert_eq!(new.user_id, 5);
        assert_eq!(new.name, "Dana Reyes");
        assert_eq!(new.phone, None);
        assert_eq!(new.city, Some("Springfield"));
        assert_eq!(new.notes, Some("Prefers email"));
    }

    #[test]
    fn from_domain_update_customer() {
        let domain = DomainUpdateCustomer::new(details());
        let update: UpdateCustomer = (&domain).into();
        assert_eq!(update.email, "dana@example.com");
        assert_eq!(update.state, None);
    }

    #[test]
    fn customer_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Customer {
            id: 1,
            user_id: 2,
            name: "Dana".into(),
            email: "dana@example.com".into(),
            phone: Some("555-0101".into()),
            address: None,
            city: None,
            state: Some("IL".into()),
            zip_code: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainCustomer::try_from(db).expect("valid customer");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.user_id.get(), 2);
        assert_eq!(domain.phone.unwrap().as_str(), "555-0101");
        assert_eq!(domain.state.as_deref(), Some("IL"));
    }
}
