//! Workflow diagram rendering.
//!
//! The dispatch policy exposes its routing as a flat edge list; renderers
//! consume only that contract. Two backends: Graphviz DOT source (written
//! to a file by the caller) and a plain ASCII listing for consoles.

use crate::dispatch::Policy;
use crate::role::Role;

/// One directed edge of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: Role,
    pub to: Role,
    pub label: String,
}

/// Derive the workflow edges from a policy.
///
/// Every transition row contributes a deliverable edge; every roster
/// expert contributes a hand-over edge from the coordinator.
pub fn workflow_edges(policy: &Policy) -> Vec<Edge> {
    let mut edges = Vec::new();

    for role in crate::role::ALL {
        if let Some(route) = policy.route(role) {
            edges.push(Edge {
                from: role,
                to: route.to,
                label: deliverable_label(role).to_string(),
            });
        }
    }

    if let Some(coordinator) = policy.coordinator() {
        for expert in policy.experts() {
            edges.push(Edge {
                from: coordinator,
                to: *expert,
                label: brief_label(*expert).to_string(),
            });
        }
    }

    edges
}

fn deliverable_label(role: Role) -> &'static str {
    match role {
        Role::Customer => "Requirements",
        Role::ProductOwner => "Project requirements",
        Role::UiUxDesigner => "User stories & estimates",
        Role::SolutionArchitect => "Architecture & estimates",
        Role::Developer => "Implementation & estimates",
        Role::FrontendDeveloper => "Frontend & estimates",
        Role::BackendDeveloper => "Backend & estimates",
        Role::RecommendationDeveloper => "Recommendations & estimates",
        Role::QaEngineer => "Testing & estimates",
        Role::TechnicalWriter => "Documentation & estimates",
        Role::DevopsEngineer => "DevOps & estimates",
        Role::SecurityEngineer => "Security & estimates",
        Role::EcommerceSpecialist => "Domain expertise & estimates",
        Role::ScrumMaster => "Final summary",
    }
}

fn brief_label(role: Role) -> &'static str {
    match role {
        Role::UiUxDesigner => "Define user stories",
        Role::SolutionArchitect => "Design architecture",
        Role::Developer => "Implement features",
        Role::FrontendDeveloper => "Implement frontend",
        Role::BackendDeveloper => "Implement backend",
        Role::RecommendationDeveloper => "Implement recommendations",
        Role::QaEngineer => "Test implementation",
        Role::TechnicalWriter => "Create documentation",
        Role::DevopsEngineer => "Set up CI/CD",
        Role::SecurityEngineer => "Implement security",
        Role::EcommerceSpecialist => "Provide best practices",
        _ => "Hand over work",
    }
}

/// Renders a workflow edge list into a textual artifact.
pub trait FlowchartRenderer {
    fn render(&self, edges: &[Edge]) -> String;
}

/// Graphviz DOT source renderer.
pub struct DotRenderer;

impl FlowchartRenderer for DotRenderer {
    fn render(&self, edges: &[Edge]) -> String {
        let mut out = String::new();
        out.push_str("digraph project_workflow {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=filled, fontname=\"Arial\"];\n");

        let mut nodes: Vec<Role> = Vec::new();
        for edge in edges {
            for role in [edge.from, edge.to] {
                if !nodes.contains(&role) {
                    nodes.push(role);
                }
            }
        }
        for role in &nodes {
            out.push_str(&format!(
                "    {} [label=\"{}\", fillcolor=\"{}\"];\n",
                role.as_str(),
                role.display_name(),
                node_color(*role)
            ));
        }

        out.push('\n');
        for edge in edges {
            out.push_str(&format!(
                "    {} -> {} [label=\"{}\"];\n",
                edge.from.as_str(),
                edge.to.as_str(),
                edge.label
            ));
        }
        out.push_str("}\n");
        out
    }
}

fn node_color(role: Role) -> &'static str {
    match role {
        Role::Customer => "mistyrose",
        Role::ScrumMaster => "palegreen",
        Role::ProductOwner => "lightsteelblue",
        _ => "lightblue",
    }
}

/// Plain text renderer for consoles without Graphviz.
pub struct AsciiRenderer;

impl FlowchartRenderer for AsciiRenderer {
    fn render(&self, edges: &[Edge]) -> String {
        let mut out = String::new();
        out.push_str("Project workflow:\n");
        for edge in edges {
            out.push_str(&format!(
                "  {} -> {}: {}\n",
                edge.from.display_name(),
                edge.to.display_name(),
                edge.label
            ));
        }
        out
    }
}
