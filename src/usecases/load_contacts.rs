use crate::domain::{contact::Contact, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContactsQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContactsOutput {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactsSourceError {
    Unauthorized,
    Unavailable,
    InvalidData,
}

pub trait ContactsSource {
    fn list_contacts(&self, user_id: UserId) -> Result<Vec<Contact>, ContactsSourceError>;
}

impl<T> ContactsSource for &T
where
    T: ContactsSource + ?Sized,
{
    fn list_contacts(&self, user_id: UserId) -> Result<Vec<Contact>, ContactsSourceError> {
        (*self).list_contacts(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadContactsError {
    Unauthorized,
    TemporarilyUnavailable,
    DataContractViolation,
}

pub fn load_contacts(
    source: &dyn ContactsSource,
    query: LoadContactsQuery,
) -> Result<LoadContactsOutput, LoadContactsError> {
    let contacts = source
        .list_contacts(query.user_id)
        .map_err(map_source_error)?;

    Ok(LoadContactsOutput { contacts })
}

fn map_source_error(error: ContactsSourceError) -> LoadContactsError {
    match error {
        ContactsSourceError::Unauthorized => LoadContactsError::Unauthorized,
        ContactsSourceError::Unavailable => LoadContactsError::TemporarilyUnavailable,
        ContactsSourceError::InvalidData => LoadContactsError::DataContractViolation,
    }
}
