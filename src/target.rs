//! Deployment Target Model
//!
//! One target per environment: a serverless function reachable through an
//! HTTP API with a single `GET /` proxy route. The target does not carry
//! its own code; it declares a [`PendingCode`] placeholder that the
//! delivery pipeline resolves at deploy time, and it exports the endpoint
//! URL for consumers outside the stack.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::StackConfig;
use crate::model::{Environment, PendingCode};

/// HTTP method of a route; only GET is exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
}

/// A single API route forwarded to the function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
}

/// Serverless function declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub runtime: String,
    pub handler: String,
    pub code: PendingCode,
    /// APP_ENV binding surfaced to the running instance
    pub app_env: String,
}

/// HTTP API declaration with a permissive CORS policy for GET
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpApiSpec {
    pub name: String,
    pub api_name: String,
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<HttpMethod>,
    pub routes: Vec<Route>,
}

/// The per-environment bundle of one HTTP endpoint and one compute unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentTarget {
    environment: Environment,
    stack_name: String,
    function: FunctionSpec,
    api: HttpApiSpec,
    export_name: String,
}

impl DeploymentTarget {
    pub fn new(environment: Environment, config: &StackConfig) -> Self {
        let function = FunctionSpec {
            name: format!("TestBackendHandler{environment}"),
            runtime: config.runtime.clone(),
            handler: config.handler.clone(),
            code: PendingCode::for_environment(environment),
            app_env: environment.tag().to_string(),
        };

        let api = HttpApiSpec {
            name: format!("BackendHttpAPI{environment}"),
            api_name: config.api_name.clone(),
            allow_origins: vec!["*".to_string()],
            allow_methods: vec![HttpMethod::Get],
            routes: vec![Route {
                method: HttpMethod::Get,
                path: "/".to_string(),
            }],
        };

        Self {
            environment,
            stack_name: crate::model::stack_name(&config.name_prefix, environment),
            function,
            api,
            export_name: format!("TestBackendAPIEndpoint{environment}"),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// `<stackNamePrefix><ENV>`
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// File name of the rendered template for this target
    pub fn template_file_name(&self) -> String {
        format!("{}.template.json", self.stack_name())
    }

    pub fn function(&self) -> &FunctionSpec {
        &self.function
    }

    pub fn api(&self) -> &HttpApiSpec {
        &self.api
    }

    /// The code placeholder the pipeline binds at deploy-task construction
    pub fn pending_code(&self) -> PendingCode {
        self.function.code.clone()
    }

    /// Endpoint URL expression, resolved by the orchestrator after the API
    /// is provisioned. Exported under [`Self::export_name`].
    pub fn endpoint_url(&self) -> String {
        format!("https://#{{{}.ApiEndpoint}}/", self.api.name)
    }

    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    /// Render the target as a deployable template document
    pub fn synthesize(&self) -> Value {
        let integration_id = format!("{}Integration", self.function.name);
        let stage_id = format!("{}DefaultStage", self.api.name);

        let mut resources = serde_json::Map::new();
        resources.insert(
            self.function.name.clone(),
            json!({
                "Type": "Serverless::Function",
                "Properties": {
                    "Runtime": self.function.runtime,
                    "Handler": self.function.handler,
                    "Code": {
                        "S3Bucket": { "Ref": self.function.code.bucket_parameter() },
                        "S3Key": { "Ref": self.function.code.key_parameter() },
                    },
                    "Environment": {
                        "Variables": { "APP_ENV": self.function.app_env }
                    },
                }
            }),
        );
        resources.insert(
            self.api.name.clone(),
            json!({
                "Type": "ApiGatewayV2::Api",
                "Properties": {
                    "Name": self.api.api_name,
                    "ProtocolType": "HTTP",
                    "CorsConfiguration": {
                        "AllowOrigins": self.api.allow_origins,
                        "AllowMethods": self.api.allow_methods,
                    },
                }
            }),
        );
        resources.insert(
            integration_id.clone(),
            json!({
                "Type": "ApiGatewayV2::Integration",
                "Properties": {
                    "ApiId": { "Ref": self.api.name },
                    "IntegrationType": "PROXY",
                    "Target": { "Ref": self.function.name },
                    "PayloadFormatVersion": "2.0",
                }
            }),
        );
        for route in &self.api.routes {
            let route_id = format!(
                "{}Route{}",
                self.api.name,
                if route.path == "/" {
                    "Root"
                } else {
                    route.path.as_str()
                }
            );
            resources.insert(
                route_id,
                json!({
                    "Type": "ApiGatewayV2::Route",
                    "Properties": {
                        "ApiId": { "Ref": self.api.name },
                        "RouteKey": format!("{} {}", json_method(route.method), route.path),
                        "Target": { "Ref": integration_id },
                    }
                }),
            );
        }
        resources.insert(
            stage_id,
            json!({
                "Type": "ApiGatewayV2::Stage",
                "Properties": {
                    "ApiId": { "Ref": self.api.name },
                    "StageName": "$default",
                    "AutoDeploy": true,
                }
            }),
        );

        let mut parameters = serde_json::Map::new();
        parameters.insert(
            self.function.code.bucket_parameter().to_string(),
            json!({
                "Type": "String",
                "Description": "Bucket holding the handler build output",
            }),
        );
        parameters.insert(
            self.function.code.key_parameter().to_string(),
            json!({
                "Type": "String",
                "Description": "Object key of the handler build output",
            }),
        );

        let mut outputs = serde_json::Map::new();
        outputs.insert(
            format!("TestBackendAPI{}", self.environment),
            json!({
                "Value": self.endpoint_url(),
                "Export": { "Name": self.export_name },
            }),
        );

        json!({
            "Parameters": parameters,
            "Resources": resources,
            "Outputs": outputs,
        })
    }
}

fn json_method(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(environment: Environment) -> DeploymentTarget {
        DeploymentTarget::new(environment, &StackConfig::default())
    }

    #[test]
    fn test_one_target_per_environment_with_stack_suffix() {
        let ppd = target(Environment::Preproduction);
        let prd = target(Environment::Production);
        assert_eq!(ppd.stack_name(), "BackendStackPPD");
        assert_eq!(prd.stack_name(), "BackendStackPRD");
        assert_eq!(ppd.template_file_name(), "BackendStackPPD.template.json");
    }

    #[test]
    fn test_single_get_route_at_root() {
        let target = target(Environment::Preproduction);
        assert_eq!(target.api().routes.len(), 1);
        let route = &target.api().routes[0];
        assert_eq!(route.method, HttpMethod::Get);
        assert_eq!(route.path, "/");
        assert_eq!(target.api().allow_methods, vec![HttpMethod::Get]);
        assert_eq!(target.api().allow_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_app_env_matches_environment_tag() {
        for env in Environment::ALL {
            assert_eq!(target(env).function().app_env, env.tag());
        }
    }

    #[test]
    fn test_endpoint_url_is_exported() {
        let target = target(Environment::Production);
        assert!(!target.endpoint_url().is_empty());
        assert_eq!(target.export_name(), "TestBackendAPIEndpointPRD");

        let template = target.synthesize();
        let output = &template["Outputs"]["TestBackendAPIPRD"];
        assert_eq!(output["Export"]["Name"], "TestBackendAPIEndpointPRD");
        assert_eq!(output["Value"], target.endpoint_url());
    }

    #[test]
    fn test_template_wires_code_parameters() {
        let target = target(Environment::Preproduction);
        let template = target.synthesize();
        assert!(template["Parameters"]["HandlerCodeBucketPPD"].is_object());
        assert!(template["Parameters"]["HandlerCodeKeyPPD"].is_object());
        let code = &template["Resources"]["TestBackendHandlerPPD"]["Properties"]["Code"];
        assert_eq!(code["S3Bucket"]["Ref"], "HandlerCodeBucketPPD");
        assert_eq!(code["S3Key"]["Ref"], "HandlerCodeKeyPPD");
    }

    #[test]
    fn test_template_route_targets_integration() {
        let template = target(Environment::Preproduction).synthesize();
        let route = &template["Resources"]["BackendHttpAPIPPDRouteRoot"]["Properties"];
        assert_eq!(route["RouteKey"], "GET /");
        assert_eq!(route["Target"]["Ref"], "TestBackendHandlerPPDIntegration");
    }
}
