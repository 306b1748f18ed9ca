//! Template renderers - one per artifact kind.
//!
//! Templates are embedded at compile time and rendered with strict undefined
//! behaviour, so a missing plan field fails the render instead of producing a
//! blank. The entrypoint composes two fragments (`subscription`, `handler`)
//! that can also be rendered on their own.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use serde::Serialize;
use tracing::debug;

use omni_roles::DerivedRoute;

use crate::artifact::{ArtifactKind, GeneratedArtifact};
use crate::error::{Result, ScaffoldError};
use crate::plan::{ServicePlan, python_docstring_text, python_str_literal};

const ENTRYPOINT: &str = "main.py.j2";
const ROLE_LOGIC: &str = "agent.py.j2";
const CONFIG: &str = "config.py.j2";
const SIDECAR_CLIENT: &str = "dapr_client.py.j2";
const MODELS: &str = "models.py.j2";
const REQUIREMENTS: &str = "requirements.txt.j2";
const DOCKERFILE: &str = "Dockerfile.j2";
const ENV_EXAMPLE: &str = "env.example.j2";
const DEPLOYMENT: &str = "deployment.yaml.j2";
const SUBSCRIPTION: &str = "fragments/subscription.py.j2";
const HANDLER: &str = "fragments/handler.py.j2";

const TEMPLATES: &[(&str, &str)] = &[
    (ENTRYPOINT, include_str!("../templates/main.py.j2")),
    (ROLE_LOGIC, include_str!("../templates/agent.py.j2")),
    (CONFIG, include_str!("../templates/config.py.j2")),
    (SIDECAR_CLIENT, include_str!("../templates/dapr_client.py.j2")),
    (MODELS, include_str!("../templates/models.py.j2")),
    (REQUIREMENTS, include_str!("../templates/requirements.txt.j2")),
    (DOCKERFILE, include_str!("../templates/Dockerfile.j2")),
    (ENV_EXAMPLE, include_str!("../templates/env.example.j2")),
    (DEPLOYMENT, include_str!("../templates/deployment.yaml.j2")),
    (
        SUBSCRIPTION,
        include_str!("../templates/fragments/subscription.py.j2"),
    ),
    (HANDLER, include_str!("../templates/fragments/handler.py.j2")),
];

#[allow(clippy::needless_pass_by_value)]
fn pystr_filter(value: String) -> String {
    python_str_literal(&value)
}

#[allow(clippy::needless_pass_by_value)]
fn pydoc_filter(value: String) -> String {
    python_docstring_text(&value)
}

/// Renders every artifact of a service from a `ServicePlan`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Build the environment and register all embedded templates.
    ///
    /// # Errors
    ///
    /// `ScaffoldError::Template` if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("pystr", pystr_filter);
        env.add_filter("pydoc", pydoc_filter);

        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|err| ScaffoldError::Template {
                    template: name,
                    source: err,
                })?;
        }
        Ok(Self { env })
    }

    fn render_template<S: Serialize>(&self, name: &'static str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|err| ScaffoldError::Template {
                template: name,
                source: err,
            })
    }

    /// `app/__init__.py` is always empty.
    #[must_use]
    pub fn render_package_init(&self, _plan: &ServicePlan) -> String {
        String::new()
    }

    /// FastAPI entrypoint: probes, subscriptions, handlers, direct endpoint.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_entrypoint(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(ENTRYPOINT, plan)
    }

    /// One `/dapr/subscribe` descriptor for a route.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_subscription(&self, route: &DerivedRoute) -> Result<String> {
        self.render_template(SUBSCRIPTION, context! { route => route })
    }

    /// One event handler stub for a route.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_handler(&self, plan: &ServicePlan, route: &DerivedRoute) -> Result<String> {
        self.render_template(
            HANDLER,
            context! { route => route, publish_topic => plan.publish_topic.clone() },
        )
    }

    /// Role logic module (`<Type>Agent`).
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_role_logic(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(ROLE_LOGIC, plan)
    }

    /// Settings schema module.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_config(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(CONFIG, plan)
    }

    /// Dapr sidecar client module.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_sidecar_client(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(SIDECAR_CLIENT, plan)
    }

    /// Request/response models module.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_models(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(MODELS, plan)
    }

    /// Pinned `requirements.txt`.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_requirements(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(REQUIREMENTS, plan)
    }

    /// Container build file.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_dockerfile(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(DOCKERFILE, plan)
    }

    /// `.env.example`.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_env_example(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(ENV_EXAMPLE, plan)
    }

    /// Kubernetes Deployment + ClusterIP Service.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render_deployment(&self, plan: &ServicePlan) -> Result<String> {
        self.render_template(DEPLOYMENT, plan)
    }

    /// Render a single artifact kind.
    ///
    /// # Errors
    ///
    /// Template rendering failure.
    pub fn render(&self, kind: ArtifactKind, plan: &ServicePlan) -> Result<String> {
        match kind {
            ArtifactKind::PackageInit => Ok(self.render_package_init(plan)),
            ArtifactKind::Entrypoint => self.render_entrypoint(plan),
            ArtifactKind::Config => self.render_config(plan),
            ArtifactKind::Models => self.render_models(plan),
            ArtifactKind::RoleLogic => self.render_role_logic(plan),
            ArtifactKind::SidecarClient => self.render_sidecar_client(plan),
            ArtifactKind::Requirements => self.render_requirements(plan),
            ArtifactKind::Dockerfile => self.render_dockerfile(plan),
            ArtifactKind::EnvExample => self.render_env_example(plan),
            ArtifactKind::Deployment => self.render_deployment(plan),
        }
    }

    /// Render every artifact kind exactly once, in write order.
    ///
    /// # Errors
    ///
    /// The first template rendering failure.
    pub fn render_all(&self, plan: &ServicePlan) -> Result<Vec<GeneratedArtifact>> {
        ArtifactKind::ALL
            .iter()
            .map(|&kind| {
                let content = self.render(kind, plan)?;
                debug!(
                    role = %plan.role,
                    path = kind.relative_path(),
                    bytes = content.len(),
                    "rendered artifact"
                );
                Ok(GeneratedArtifact::new(kind, content))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ScaffoldSettings;
    use omni_roles::RoleRegistry;

    fn plan_for(id: &str) -> ServicePlan {
        let registry = RoleRegistry::builtin().unwrap();
        ServicePlan::new(registry.lookup(id).unwrap(), &ScaffoldSettings::default())
    }

    #[test]
    fn test_all_templates_parse() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_handler_publishes_to_first_outbound() {
        let renderer = TemplateRenderer::new().unwrap();
        let plan = plan_for("debug");
        let handler = renderer.render_handler(&plan, &plan.routes[0]).unwrap();
        assert!(handler.starts_with("@app.post(\"/on_debug_requests\")\n"));
        assert!(handler.contains("async def handle_debug_requests(event: dict):"));
        assert!(handler.contains("await publish_event(\"debug-responses\", result)"));
    }

    #[test]
    fn test_handler_without_outbound_topic_skips_publish() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut plan = plan_for("debug");
        plan.publish_topic = None;
        let handler = renderer.render_handler(&plan, &plan.routes[0]).unwrap();
        assert!(!handler.contains("publish_event"));
        assert!(handler.contains("return {\"status\": \"success\"}"));
    }

    #[test]
    fn test_subscription_fragment() {
        let renderer = TemplateRenderer::new().unwrap();
        let route = DerivedRoute::from_topic("debug-requests");
        let fragment = renderer.render_subscription(&route).unwrap();
        assert!(fragment.contains("\"pubsubname\": settings.PUBSUB_NAME,"));
        assert!(fragment.contains("\"topic\": \"debug-requests\","));
        assert!(fragment.contains("\"route\": \"/on_debug_requests\","));
    }

    #[test]
    fn test_package_init_is_empty() {
        let renderer = TemplateRenderer::new().unwrap();
        assert_eq!(renderer.render_package_init(&plan_for("debug")), "");
    }

    #[test]
    fn test_prompt_template_rendered_as_python_literal() {
        let renderer = TemplateRenderer::new().unwrap();
        let agent = renderer.render_role_logic(&plan_for("debug")).unwrap();
        assert!(agent.contains(r#"PROMPT_TEMPLATE = "Fix this error:\n{code}\n\nError: {error}""#));
        assert!(agent.contains(r#"PROMPT_FIELDS = ("code", "error", )"#));
        assert!(agent.contains("class DebugAgent:"));
        assert!(agent.contains("temperature=0.7,"));
        assert!(agent.contains("max_tokens=1000,"));
    }

    #[test]
    fn test_prompt_fields_checked_before_formatting() {
        let renderer = TemplateRenderer::new().unwrap();
        let agent = renderer.render_role_logic(&plan_for("debug")).unwrap();
        let check = agent
            .find("missing = [field for field in PROMPT_FIELDS if field not in data]")
            .unwrap();
        let format = agent.find("PROMPT_TEMPLATE.format(**data)").unwrap();
        assert!(check < format);
        assert!(agent.contains("payload is missing prompt fields: {', '.join(missing)}"));
        assert!(
            agent.find("prompt = self._build_prompt(data)").unwrap()
                < agent.find("context = await self._get_context(user_id)").unwrap()
        );
    }
}
