use crate::{AppError, AppState};
use backend_domain::Person;

pub async fn list_people(state: &AppState) -> Result<Vec<Person>, AppError> {
    let mut people = state.person_repo.list_people().await?;
    people.sort_by_key(|person| person.id);
    Ok(people)
}
