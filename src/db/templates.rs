use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgPool;
use uuid::Uuid;


#[derive(Debug, Clone, Serialize)]
#[derive(sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: Uuid,
    pub template_name: String,
    pub body: String,
    pub footer: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// The mutable fields of a template. Updates replace all of them.
#[derive(Debug, Clone)]
pub struct TemplateFields {
    pub template_name: String,
    pub body: String,
    pub footer: String,
    pub image_url: String,
}


#[derive(Clone)]
pub struct TemplateQueries {
    pool: PgPool,
}


impl TemplateQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        fields: &TemplateFields,
    )
    -> Result<EmailTemplate, sqlx::Error> {

        let template = sqlx::query_as::<_, EmailTemplate>("INSERT INTO templates (template_name, body, footer, image_url) VALUES ($1, $2, $3, $4) RETURNING id, template_name, body, footer, image_url, created_at;")
            .bind(&fields.template_name)
            .bind(&fields.body)
            .bind(&fields.footer)
            .bind(&fields.image_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(template)
    }

    pub async fn get_all(&self) -> Result<Vec<EmailTemplate>, sqlx::Error> {

        let templates = sqlx::query_as::<_, EmailTemplate>("SELECT id, template_name, body, footer, image_url, created_at FROM templates ORDER BY created_at ASC;")
            .fetch_all(&self.pool)
            .await?;

        Ok(templates)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<EmailTemplate>, sqlx::Error> {

        let template = sqlx::query_as::<_, EmailTemplate>("SELECT id, template_name, body, footer, image_url, created_at FROM templates WHERE template_name = $1 ORDER BY created_at DESC LIMIT 1;")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(template)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: &TemplateFields,
    )
    -> Result<Option<EmailTemplate>, sqlx::Error> {

        let template = sqlx::query_as::<_, EmailTemplate>("UPDATE templates SET template_name = $1, body = $2, footer = $3, image_url = $4 WHERE id = $5 RETURNING id, template_name, body, footer, image_url, created_at;")
            .bind(&fields.template_name)
            .bind(&fields.body)
            .bind(&fields.footer)
            .bind(&fields.image_url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(template)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {

        let result = sqlx::query("DELETE FROM templates WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let template = EmailTemplate {
            id: Uuid::new_v4(),
            template_name: "Promo".to_string(),
            body: "Hello".to_string(),
            footer: "Bye".to_string(),
            image_url: "http://x/img.png".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&template).unwrap();

        assert_eq!(value["templateName"], "Promo");
        assert_eq!(value["imageUrl"], "http://x/img.png");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("template_name").is_none());
    }
}
