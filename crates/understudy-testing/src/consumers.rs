//! Code under test that depends on a mocked trait
//!
//! [`PersonService`] talks to storage through the [`PersonDao`] trait.
//! [`MockPersonDao`] implements that trait by forwarding to a [`MockHandle`],
//! which is the pattern for mocking any Rust trait with understudy.

use crate::fixtures;
use serde::{Deserialize, Serialize};
use understudy_core::{args, Error, Fault, Result, Value};
use understudy_engine::{MockHandle, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
}

impl Person {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Storage port for people.
pub trait PersonDao {
    fn update(&self, person: &Person) -> Result<()>;
    fn find(&self, id: i64) -> Result<Option<Person>>;
}

/// Business logic over a [`PersonDao`].
pub struct PersonService<D> {
    dao: D,
}

impl<D: PersonDao> PersonService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn update(&self, id: i64, name: &str) -> Result<()> {
        self.dao.update(&Person::new(id, name))
    }

    /// Rename an existing person. Returns false when `id` is unknown.
    pub fn rename(&self, id: i64, name: &str) -> Result<bool> {
        match self.dao.find(id)? {
            Some(mut person) => {
                person.name = name.to_string();
                self.dao.update(&person)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// [`PersonDao`] backed by a mock of [`fixtures::person_dao`].
#[derive(Debug, Clone)]
pub struct MockPersonDao {
    handle: MockHandle,
}

impl MockPersonDao {
    pub fn new(session: &Session) -> Self {
        Self {
            handle: session.mock(fixtures::person_dao()),
        }
    }

    /// The underlying handle, for stubbing and verification.
    pub fn handle(&self) -> &MockHandle {
        &self.handle
    }
}

impl PersonDao for MockPersonDao {
    fn update(&self, person: &Person) -> Result<()> {
        self.handle.call("update", vec![to_arg(person)?])?;
        Ok(())
    }

    fn find(&self, id: i64) -> Result<Option<Person>> {
        self.handle.call_as("find", args![id])
    }
}

fn to_arg<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::from(Fault::new("Serialization", e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use understudy_core::{any, matchers, ArgumentCaptor};

    #[test]
    fn test_rename_unknown_person() {
        let session = Session::new();
        let dao = MockPersonDao::new(&session);
        let service = PersonService::new(dao.clone());

        assert!(!service.rename(7, "jill").unwrap());
        dao.handle().verify_called("find", matchers![7]).unwrap();
        dao.handle().verify_no_more_interactions().unwrap();
    }

    #[test]
    fn test_rename_known_person() {
        let session = Session::new();
        let dao = MockPersonDao::new(&session);
        dao.handle()
            .when("find", matchers![1])
            .unwrap()
            .then_return(json!({"id": 1, "name": "jack"}));
        let service = PersonService::new(dao.clone());

        assert!(service.rename(1, "jill").unwrap());

        let captor = ArgumentCaptor::new();
        dao.handle().verify_called("update", [captor.capture()]).unwrap();
        assert_eq!(captor.value_as::<Person>(), Some(Person::new(1, "jill")));
    }

    #[test]
    fn test_dao_fault_reaches_service_caller() {
        let session = Session::new();
        let dao = MockPersonDao::new(&session);
        dao.handle()
            .when("update", [any()])
            .unwrap()
            .then_throw(Fault::new("SQLException", "connection reset"));
        let service = PersonService::new(dao);

        let err = service.update(1, "jack").unwrap_err();
        assert_eq!(err.to_string(), "SQLException: connection reset");
    }
}
