use crate::errors::HabitError;
use crate::models::{CompletionUpdate, Habit, HabitId, NewHabit};
use reqwest::{Client, Response, Url};

/// Thin JSON client for the habits REST endpoint (`/api/habits`).
#[derive(Debug, Clone)]
pub struct HabitClient {
    http: Client,
    base: Url,
}

impl HabitClient {
    pub fn new(base_url: &str) -> Result<Self, HabitError> {
        let base = Url::parse(base_url).map_err(|err| HabitError::InvalidEndpoint {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(HabitError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: "not a hierarchical url".to_string(),
            });
        }

        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub async fn list(&self) -> Result<Vec<Habit>, HabitError> {
        let response = self.http.get(self.base.clone()).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    pub async fn create(&self, habit: &NewHabit) -> Result<(), HabitError> {
        let response = self.http.post(self.base.clone()).json(habit).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn set_completed(&self, id: &HabitId, completed: bool) -> Result<(), HabitError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(&CompletionUpdate { completed })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &HabitId) -> Result<(), HabitError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    fn item_url(&self, id: &HabitId) -> Url {
        let mut url = self.base.clone();
        // checked in new(): the base always has path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }
}

async fn ensure_success(response: Response) -> Result<Response, HabitError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(HabitError::Server {
        status: status.as_u16(),
        message: message.trim().to_string(),
    })
}
