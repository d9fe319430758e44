// Case-insensitive person name lookup

use std::collections::HashMap;

use crate::entities::Person;
use crate::value_objects::PersonId;

#[derive(Debug, Clone, Default)]
pub struct PersonDirectory {
    by_name: HashMap<String, PersonId>,
}

impl PersonDirectory {
    pub fn from_people(people: &[Person]) -> Self {
        Self {
            by_name: people
                .iter()
                .map(|person| (person.name.to_lowercase(), person.id))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<PersonId> {
        self.by_name.get(&name.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let directory = PersonDirectory::from_people(&[Person {
            id: PersonId(7),
            name: "Nhân viên 1".to_string(),
        }]);
        assert_eq!(directory.lookup("NHÂN VIÊN 1"), Some(PersonId(7)));
        assert_eq!(directory.lookup("Nhân viên 2"), None);
    }
}
