//! The résumé rendered by the `resume` binary.

use crate::model::{Bullet, ContactKind, Education, Job, Resume};

/// Returns the compiled-in résumé content.
pub fn sample_resume() -> Resume {
    Resume::new("Candidate Name")
        .with_headline("Product, Security or IT Professional")
        .with_summary(
            "Results-oriented professional with experience supporting and improving digital \
             products, information systems, and cloud environments. Strong skills in \
             troubleshooting, automation, and cross-team communication. Eager to contribute to \
             organizational goals in technology-driven settings.",
        )
        .with_contact(ContactKind::Email, "sample@email.com")
        .with_contact(ContactKind::Phone, "+1 000 000 0000")
        .with_contact(ContactKind::Location, "City, Country")
        .with_contact(ContactKind::LinkedIn, "linkedin.com/in/sampleuser")
        .with_skills([
            "Problem Solving",
            "System Troubleshooting",
            "Process Optimization",
            "End-user Support",
            "Documentation",
            "Workflow Automation",
            "Quality Assurance",
            "Security Awareness",
            "Incident Response",
            "Remote Collaboration",
            "Continuous Learning",
            "Requirements Gathering",
        ])
        .with_tool_group(
            "Core Tools:",
            "Security Tool Suite, Productivity Suite, Ticketing Platform",
        )
        .with_tool_group(
            "Platforms:",
            "Cloud Platform, Enterprise OS, Virtualization Layer",
        )
        .with_tool_group("Development/Testing:", "CI/CD, API Tools, Issue Tracker")
        .with_tool_group(
            "Collaboration Tools:",
            "Document Sharing, Communication Platform, Analytics Dashboard",
        )
        .with_tool_group(
            "Concepts/Standards:",
            "Security Best Practices, API Concepts, Networking Protocols",
        )
        .with_tool_group(
            "Automation/Scripting:",
            "Python, Scripting Language, SQL, Markup Language",
        )
        .with_job(
            Job::new("Support Team Lead", "CompanyXYZ", "2021 - 2023")
                .with_bullets([
                    "Provided daily operations and general technical support for digital products.",
                    "Coordinated onboarding/training activities to improve knowledge sharing.",
                    "Participated in process improvements for customer and end-user workflows.",
                    "Supported automation and workflow initiatives using standard tools.",
                ])
                .with_bullet(Bullet::group(
                    "Project/team optimization efforts:",
                    [
                        "Improved process consistency across teams.",
                        "Streamlined incident communication.",
                        "Assisted in reducing resolution time for escalations.",
                    ],
                )),
        )
        .with_job(
            Job::new("Technical Support Specialist", "CompanyXYZ", "2019 - 2021").with_bullets([
                "Served as primary contact for end-user incident resolution.",
                "Assisted teams in troubleshooting, configuration, and technical documentation.",
                "Participated in tool integrations and process platform migrations.",
                "Maintained knowledge base and procedural documents.",
            ]),
        )
        .with_job(
            Job::new("IT/Application Support", "CompanyXYZ", "2017 - 2019").with_bullets([
                "Provided general platform and application support.",
                "Guided users in self-service environments.",
                "Identified recurring issues and proposed procedural improvements.",
                "Collaborated across teams to support releases and bug fixes.",
            ]),
        )
        .with_job(
            Job::new("QA / Product Support Assistant", "CompanyXYZ", "2016 - 2017").with_bullets([
                "Assisted teams in feature verification and validation.",
                "Helped create test plans and managed basic research documentation.",
                "Supported cross-team knowledge exchange.",
            ]),
        )
        .with_certifications([
            "Professional Certification A",
            "Professional Certification B",
            "Certificate in Customer Service",
            "Training: Quality Processes",
        ])
        .with_education(Education::new(
            "Bachelor's Degree in a Technical Field",
            "Sample University",
            "2012 - 2017",
        ))
        .with_language("English", "Professional Working Proficiency")
        .with_language("Language B", "Native or Full Proficiency")
}
