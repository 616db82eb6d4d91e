//! External REST resources managed by the panel

use panelkit_common::{PanelError, is_kebab_case};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Check, validate_fields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A configured external resource. `name` is globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub label: String,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<HttpMethod>>,
}

impl Resource {
    /// Whether the resource allows `method`; no list means everything is allowed
    pub fn allows(&self, method: HttpMethod) -> bool {
        self.methods
            .as_ref()
            .is_none_or(|methods| methods.contains(&method))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, max = 128, message = "must be 1-128 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 256, message = "must be 1-256 characters"))]
    pub label: String,
    #[validate(length(min = 1, max = 1024, message = "must be 1-1024 characters"))]
    pub endpoint: String,
    #[serde(default)]
    pub methods: Option<Vec<HttpMethod>>,
}

impl CreateResourceRequest {
    pub fn into_resource(self, id: String) -> Resource {
        Resource {
            id,
            name: self.name,
            label: self.label,
            endpoint: self.endpoint,
            methods: self.methods,
        }
    }
}

impl Check for CreateResourceRequest {
    fn check(&self) -> Result<(), PanelError> {
        validate_fields(self)?;
        check_name(&self.name)?;
        check_endpoint(&self.endpoint)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[validate(length(min = 1, max = 128, message = "must be 1-128 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 256, message = "must be 1-256 characters"))]
    pub label: Option<String>,
    #[validate(length(min = 1, max = 1024, message = "must be 1-1024 characters"))]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub methods: Option<Vec<HttpMethod>>,
}

impl UpdateResourceRequest {
    pub fn apply_to(self, resource: &mut Resource) {
        if let Some(name) = self.name {
            resource.name = name;
        }
        if let Some(label) = self.label {
            resource.label = label;
        }
        if let Some(endpoint) = self.endpoint {
            resource.endpoint = endpoint;
        }
        if self.methods.is_some() {
            resource.methods = self.methods;
        }
    }
}

impl Check for UpdateResourceRequest {
    fn check(&self) -> Result<(), PanelError> {
        validate_fields(self)?;
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(endpoint) = &self.endpoint {
            check_endpoint(endpoint)?;
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), PanelError> {
    if !is_kebab_case(name) {
        return Err(PanelError::validation(format!(
            "name: '{}' must be kebab-case",
            name
        )));
    }
    Ok(())
}

fn check_endpoint(endpoint: &str) -> Result<(), PanelError> {
    if !(endpoint.starts_with('/') || endpoint.starts_with("http")) {
        return Err(PanelError::validation(format!(
            "endpoint: '{}' must be an absolute path or URL",
            endpoint
        )));
    }
    Ok(())
}
