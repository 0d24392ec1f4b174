//! Scope parameters and the URL templates built from them.

/// Environment used when none is given
pub const DEFAULT_ENVIRONMENT: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceParams {
    pub space_id: String,
}

impl SpaceParams {
    pub fn new(space_id: impl Into<String>) -> Self {
        SpaceParams {
            space_id: space_id.into(),
        }
    }

    /// `/spaces/{space_id}`
    pub fn url(&self) -> String {
        format!("/spaces/{}", self.space_id)
    }

    /// Scope to one environment of this space
    pub fn environment(&self, environment_id: impl Into<String>) -> SpaceEnvironmentParams {
        SpaceEnvironmentParams::new(self.space_id.clone(), environment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceEnvironmentParams {
    pub space_id: String,
    pub environment_id: String,
}

impl SpaceEnvironmentParams {
    pub fn new(space_id: impl Into<String>, environment_id: impl Into<String>) -> Self {
        SpaceEnvironmentParams {
            space_id: space_id.into(),
            environment_id: environment_id.into(),
        }
    }

    /// Scope to the `master` environment
    pub fn master(space_id: impl Into<String>) -> Self {
        Self::new(space_id, DEFAULT_ENVIRONMENT)
    }

    /// `/spaces/{space_id}/environments/{environment_id}`
    pub fn url(&self) -> String {
        format!(
            "/spaces/{}/environments/{}",
            self.space_id, self.environment_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationParams {
    pub organization_id: String,
}

impl OrganizationParams {
    pub fn new(organization_id: impl Into<String>) -> Self {
        OrganizationParams {
            organization_id: organization_id.into(),
        }
    }

    /// `/organizations/{organization_id}`
    pub fn url(&self) -> String {
        format!("/organizations/{}", self.organization_id)
    }

    pub fn team(&self, team_id: impl Into<String>) -> TeamParams {
        TeamParams {
            organization_id: self.organization_id.clone(),
            team_id: team_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamParams {
    pub organization_id: String,
    pub team_id: String,
}

impl TeamParams {
    pub fn new(organization_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        TeamParams {
            organization_id: organization_id.into(),
            team_id: team_id.into(),
        }
    }

    pub fn organization(&self) -> OrganizationParams {
        OrganizationParams::new(self.organization_id.clone())
    }
}
