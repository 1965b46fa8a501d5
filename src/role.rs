//! Participant roles with fixed instruction profiles.
//!
//! The role set is closed: every conversation participant is one of the
//! variants below. Each role carries a static instruction profile (its
//! system prompt) and, for roster experts, a fixed follow-up brief the
//! scrum master sends when handing work over.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A fixed participant identity in the simulated project conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    ProductOwner,
    ScrumMaster,
    UiUxDesigner,
    SolutionArchitect,
    /// Legacy generalist kept for backward-compatible routing.
    Developer,
    FrontendDeveloper,
    BackendDeveloper,
    RecommendationDeveloper,
    QaEngineer,
    TechnicalWriter,
    DevopsEngineer,
    SecurityEngineer,
    EcommerceSpecialist,
}

/// All roles in declaration order.
pub const ALL: [Role; 14] = [
    Role::Customer,
    Role::ProductOwner,
    Role::ScrumMaster,
    Role::UiUxDesigner,
    Role::SolutionArchitect,
    Role::Developer,
    Role::FrontendDeveloper,
    Role::BackendDeveloper,
    Role::RecommendationDeveloper,
    Role::QaEngineer,
    Role::TechnicalWriter,
    Role::DevopsEngineer,
    Role::SecurityEngineer,
    Role::EcommerceSpecialist,
];

/// Expert roster in round-robin priority order.
///
/// The scrum master works through this list front to back when deciding
/// who still owes an estimate. The order is fixed; it is not alphabetical
/// and not response order.
pub const EXPERTS: [Role; 10] = [
    Role::UiUxDesigner,
    Role::SolutionArchitect,
    Role::FrontendDeveloper,
    Role::BackendDeveloper,
    Role::RecommendationDeveloper,
    Role::QaEngineer,
    Role::TechnicalWriter,
    Role::DevopsEngineer,
    Role::SecurityEngineer,
    Role::EcommerceSpecialist,
];

impl Role {
    /// Stable slug used in config values, log file names, and the task
    /// line format.
    ///
    /// # Examples
    /// ```
    /// use scrumsim::role::Role;
    /// assert_eq!(Role::ProductOwner.as_str(), "product_owner");
    /// assert_eq!(Role::QaEngineer.as_str(), "qa_engineer");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::ProductOwner => "product_owner",
            Role::ScrumMaster => "scrum_master",
            Role::UiUxDesigner => "ui_ux_designer",
            Role::SolutionArchitect => "solution_architect",
            Role::Developer => "developer",
            Role::FrontendDeveloper => "frontend_developer",
            Role::BackendDeveloper => "backend_developer",
            Role::RecommendationDeveloper => "recommendation_developer",
            Role::QaEngineer => "qa_engineer",
            Role::TechnicalWriter => "technical_writer",
            Role::DevopsEngineer => "devops_engineer",
            Role::SecurityEngineer => "security_engineer",
            Role::EcommerceSpecialist => "ecommerce_specialist",
        }
    }

    /// Parse a role from its slug.
    ///
    /// # Examples
    /// ```
    /// use scrumsim::role::Role;
    /// assert_eq!(Role::parse("scrum_master"), Some(Role::ScrumMaster));
    /// assert_eq!(Role::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        ALL.iter().copied().find(|r| r.as_str() == s)
    }

    /// Human-readable name for console output and transcripts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::ProductOwner => "Product Owner",
            Role::ScrumMaster => "Scrum Master",
            Role::UiUxDesigner => "UI/UX Designer",
            Role::SolutionArchitect => "Solution Architect",
            Role::Developer => "Developer",
            Role::FrontendDeveloper => "Frontend Developer",
            Role::BackendDeveloper => "Backend Developer",
            Role::RecommendationDeveloper => "Recommendation Developer",
            Role::QaEngineer => "QA Engineer",
            Role::TechnicalWriter => "Technical Writer",
            Role::DevopsEngineer => "DevOps Engineer",
            Role::SecurityEngineer => "Security Engineer",
            Role::EcommerceSpecialist => "E-commerce Specialist",
        }
    }

    /// Whether this role is on the expert roster.
    pub fn is_expert(&self) -> bool {
        EXPERTS.contains(self)
    }

    /// Built-in instruction profile (system prompt) for this role.
    ///
    /// Overridable per role via a `prompts/` directory; see
    /// [`crate::prompt::instructions_for`].
    pub fn instructions(&self) -> &'static str {
        match self {
            Role::Customer => {
                "You are a customer describing requirements for a new product. \
                 Describe what you need in plain language."
            }
            Role::ProductOwner => {
                "Represents the customer's needs, manages the product backlog, and \
                 prioritizes features for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Features / Productivity = Total Duration\n\
                 - e.g., 6 features / 3 features per week = 2 weeks"
            }
            Role::ScrumMaster => {
                "Facilitates Scrum ceremonies, removes obstacles, and ensures team \
                 adherence to Agile principles. Supports daily stand-ups, sprint \
                 planning, and retrospectives.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Days Required:\n\
                 - Total Ceremonies / Productivity = Total Duration\n\
                 - e.g., 4 ceremonies / 1 ceremony per day = 4 days"
            }
            Role::UiUxDesigner => {
                "Designs user interfaces and experiences for the project. Tasks \
                 include wireframes, prototypes, and mobile interfaces.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Screens / Productivity = Total Duration\n\
                 - e.g., 9 screens / 3 screens per week = 3 weeks"
            }
            Role::SolutionArchitect => {
                "Designs the system architecture for the project including services \
                 and integrations.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Components / Productivity = Total Duration\n\
                 - e.g., 4 components / 1 per week = 4 weeks"
            }
            Role::Developer => {
                "Develops features, integrates APIs, and manages frontend/backend \
                 logic for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total SLOC / Productivity = Total Duration\n\
                 - e.g., 1000 SLOC / 500 SLOC per week = 2 weeks"
            }
            Role::FrontendDeveloper => {
                "Implements responsive web interfaces and interactive user-facing \
                 features for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total SLOC / Productivity = Total Duration\n\
                 - e.g., 500 SLOC / 250 SLOC per week = 2 weeks"
            }
            Role::BackendDeveloper => {
                "Creates APIs for the catalog, user management, and order \
                 processing, and implements the core business logic.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total SLOC / Productivity = Total Duration\n\
                 - e.g., 500 SLOC / 250 SLOC per week = 2 weeks"
            }
            Role::RecommendationDeveloper => {
                "Creates personalized recommendation algorithms and implements user \
                 behavior tracking for relevant suggestions.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total SLOC / Productivity = Total Duration\n\
                 - e.g., 400 SLOC / 200 SLOC per week = 2 weeks"
            }
            Role::QaEngineer => {
                "Tests features and validates functionality for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Days Required:\n\
                 - Total Test Cases / Productivity = Total Duration\n\
                 - e.g., 25 test cases / 5 per day = 5 days"
            }
            Role::TechnicalWriter => {
                "Writes user guides, API docs, and release notes for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Pages / Productivity = Total Duration\n\
                 - e.g., 8 pages / 4 pages per week = 2 weeks"
            }
            Role::DevopsEngineer => {
                "Handles CI/CD, infrastructure, and deployment automation for the \
                 project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Tasks / Productivity = Total Duration\n\
                 - e.g., 6 tasks / 2 tasks per week = 3 weeks"
            }
            Role::SecurityEngineer => {
                "Conducts code reviews, penetration testing, and secures sensitive \
                 data for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Security Tasks / Productivity = Total Duration\n\
                 - e.g., 3 tasks / 1 task per week = 3 weeks"
            }
            Role::EcommerceSpecialist => {
                "Provides best practices in cataloging, checkout UX, and promotions \
                 for the project.\n\
                 IMPORTANT: When responding, always show your work in this format:\n\
                 Estimated Weeks Required:\n\
                 - Total Areas / Productivity = Total Duration\n\
                 - e.g., 6 areas / 2 per week = 3 weeks"
            }
        }
    }

    /// The scrum master's fixed hand-over brief for this role, if any.
    ///
    /// Appended to the conversation when the round-robin routes to the
    /// role. Only roster experts (and the legacy developer) have one.
    pub fn follow_up(&self) -> Option<&'static str> {
        FOLLOW_UPS.get(self).copied()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Hand-over briefs sent by the scrum master when dispatching to an expert.
static FOLLOW_UPS: Lazy<HashMap<Role, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        Role::UiUxDesigner,
        "I have received the customer's requirements from the Product Owner. \
         Define user stories and acceptance criteria for the project. Organize \
         at least 10 user stories, each with a unique ID. Provide work and \
         effort estimates based on the number of stories documented for this \
         sprint. Please show your detailed calculation steps for the estimate.",
    );
    m.insert(
        Role::SolutionArchitect,
        "The UI/UX Designer has completed the user stories. Design the \
         technical architecture to support these requirements, prioritizing \
         security, scalability, and compliance. Include work and effort \
         estimates based on the number of architectural components designed \
         for this sprint. Please show your detailed calculation steps for the \
         estimate.",
    );
    m.insert(
        Role::FrontendDeveloper,
        "The Architect has completed the design. Begin implementing the \
         responsive web interfaces and interactive features. Estimate the \
         number of source lines of code (SLOC) and effort required for the \
         frontend development. Please show your detailed calculation steps \
         for the estimate.",
    );
    m.insert(
        Role::BackendDeveloper,
        "The Frontend Developer has started their work. Now we need APIs for \
         the catalog, user management, and order processing. Implement the \
         core business logic. Estimate the number of source lines of code \
         (SLOC) and effort required for the backend development. Please show \
         your detailed calculation steps for the estimate.",
    );
    m.insert(
        Role::RecommendationDeveloper,
        "With the frontend and backend underway, we now need personalized \
         recommendation algorithms and user behavior tracking. Estimate the \
         number of source lines of code (SLOC) and effort required for the \
         recommendation system. Please show your detailed calculation steps \
         for the estimate.",
    );
    m.insert(
        Role::Developer,
        "The Architect has completed the design. Begin implementing the \
         features based on the user stories and architectural components. \
         Estimate the number of source lines of code (SLOC) and effort \
         required for this sprint's development. Please show your detailed \
         calculation steps for the estimate.",
    );
    m.insert(
        Role::QaEngineer,
        "The development phase is complete. Create and execute test cases \
         based on user stories. Provide work and effort estimates based on \
         the number of test cases created and executed in this sprint. Please \
         show your detailed calculation steps for the estimate.",
    );
    m.insert(
        Role::TechnicalWriter,
        "Testing is complete. Prepare the user documentation and training \
         materials based on the deliverables of this sprint. Provide work and \
         effort estimates for documentation creation. Please show your \
         detailed calculation steps for the estimate.",
    );
    m.insert(
        Role::DevopsEngineer,
        "Documentation is complete. Set up the CI/CD pipeline, infrastructure, \
         and deployment automation. Provide work and effort estimates for \
         DevOps setup and automation. Please show your detailed calculation \
         steps for the estimate.",
    );
    m.insert(
        Role::SecurityEngineer,
        "The CI/CD pipeline is set up. Conduct security reviews, implement \
         security measures, and secure sensitive data. Provide work and \
         effort estimates for security implementation. Please show your \
         detailed calculation steps for the estimate.",
    );
    m.insert(
        Role::EcommerceSpecialist,
        "Development is near completion. Provide best practices for \
         cataloging, checkout UX, and promotions. Provide work and effort \
         estimates for implementing these best practices. Please show your \
         detailed calculation steps for the estimate.",
    );
    m
});
