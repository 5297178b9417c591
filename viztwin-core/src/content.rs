//! Static copy for the marketing pages

use crate::route::Page;

pub const BRAND: &str = "VizTwin";

/// Navigation bar entries, left to right
pub const NAV_LINKS: [(Page, &str); 3] = [
    (Page::Home, "Home"),
    (Page::Library, "Library"),
    (Page::About, "About"),
];

pub const LOGIN_LABEL: &str = "Login / Sign Up";

pub struct Hero {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub primary_action: &'static str,
    pub secondary_action: &'static str,
}

pub const HERO: Hero = Hero {
    headline: "Turn your scans into smart 3D models.",
    tagline: "VizTwin uses AI to convert point clouds into accurate, interactive building models, no technical background needed.",
    primary_action: "Upload Your Scan",
    secondary_action: "Watch Demo",
};

pub struct Feature {
    pub title: &'static str,
    pub body: &'static str,
}

pub const FEATURES_HEADING: &str = "Why Choose VizTwin?";
pub const FEATURES_INTRO: &str =
    "Transform your building scans into actionable insights with AI-powered precision.";

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Easy Upload",
        body: "Simply drag and drop your point cloud files. We support all major scan formats.",
    },
    Feature {
        title: "AI-Powered Processing",
        body: "Our advanced AI automatically identifies walls, doors, ceilings, and architectural elements.",
    },
    Feature {
        title: "Interactive Models",
        body: "Explore your building in 3D with intuitive controls. Export to popular formats.",
    },
];

pub const CTA_HEADING: &str = "Ready to get started?";
pub const CTA_BODY: &str =
    "Join thousands of building owners transforming their scans into smart models.";
pub const CTA_ACTION: &str = "Start Your First Scan";

pub const ABOUT_TITLE: &str = "About VizTwin";
pub const ABOUT_PARAGRAPHS: [&str; 3] = [
    "VizTwin is a cutting-edge platform that transforms 3D scans into accurate digital building models using advanced AI technology.",
    "Our mission is to make building intelligence accessible to everyone, regardless of technical background. We believe that property owners, architects, and facility managers should have easy access to precise 3D models of their buildings.",
    "With VizTwin, you can upload point cloud scans from any device and receive interactive, exportable 3D models in minutes. Our AI automatically identifies architectural elements like walls, doors, ceilings, and floors, saving you hours of manual work.",
];

pub const DASHBOARD_TITLE: &str = "Dashboard";
pub const VIEWER_TITLE: &str = "3D Model Viewer";
pub const VIEWER_HINT: &str = "Click and drag to rotate, click elements to view properties";
pub const UPLOAD_LABEL: &str = "Upload Scan";
pub const PROCESSING_LABEL: &str = "AI is processing your scan...";
pub const NO_SELECTION: &str = "Click on an element in the 3D viewer to view its properties";

/// Export affordances. They have no backing codec.
pub const EXPORT_FORMATS: [&str; 3] = [".obj", ".fbx", ".ifc"];

pub const LIBRARY_TITLE: &str = "Project Library";
pub const NEW_PROJECT: &str = "New Project";
pub const EMPTY_TITLE: &str = "No projects yet";
pub const EMPTY_BODY: &str = "Start by uploading your first 3D scan";
pub const EMPTY_ACTION: &str = "Create First Project";

pub const FOOTER_TAGLINE: &str = "Helix: Building Intelligence, Simplified.";
pub const FOOTER_COPYRIGHT: &str = "© 2025 Helix. All rights reserved.";
