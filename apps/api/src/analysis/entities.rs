//! Entity extraction: skills and technologies from a fixed, ordered rule table.
//!
//! Company extraction has no backing database and always returns an empty set.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Skill,
    Technology,
}

/// One extraction rule: a case-insensitive pattern and the bucket its matches land in.
pub struct EntityRule {
    pub kind: EntityKind,
    pub pattern: &'static str,
}

pub const ENTITY_RULES: &[EntityRule] = &[
    // languages
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(python|java|javascript|typescript|c\+\+|ruby|go|rust|kotlin|swift)\b",
    },
    // frameworks
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(react|angular|vue|node|express|django|flask|spring|laravel)\b",
    },
    // data stores
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(sql|nosql|mongodb|postgresql|mysql|redis|elasticsearch)\b",
    },
    // cloud / devops
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(aws|azure|gcp|kubernetes|docker|terraform|jenkins)\b",
    },
    // ML
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(machine learning|ml|ai|deep learning|nlp|computer vision)\b",
    },
    // process
    EntityRule {
        kind: EntityKind::Skill,
        pattern: r"\b(agile|scrum|kanban|ci/cd|devops|microservices)\b",
    },
    // protocols
    EntityRule {
        kind: EntityKind::Technology,
        pattern: r"\b(rest|graphql|api|grpc|websocket|http)\b",
    },
    // version control
    EntityRule {
        kind: EntityKind::Technology,
        pattern: r"\b(git|github|gitlab|bitbucket|svn)\b",
    },
    // operating systems
    EntityRule {
        kind: EntityKind::Technology,
        pattern: r"\b(linux|unix|windows|macos|ios|android)\b",
    },
    // build tools
    EntityRule {
        kind: EntityKind::Technology,
        pattern: r"\b(webpack|vite|rollup|babel|typescript)\b",
    },
];

static COMPILED_RULES: LazyLock<Vec<(EntityKind, Regex)>> = LazyLock::new(|| {
    ENTITY_RULES
        .iter()
        .filter_map(|rule| {
            Regex::new(&format!("(?i){}", rule.pattern))
                .ok()
                .map(|re| (rule.kind, re))
        })
        .collect()
});

/// Deduplicated, lowercased entity sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub skills: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
    /// Always empty.
    pub companies: BTreeSet<String>,
}

pub fn extract_entities(text: &str) -> EntityBundle {
    let mut bundle = EntityBundle::default();
    for (kind, regex) in COMPILED_RULES.iter() {
        let bucket = match kind {
            EntityKind::Skill => &mut bundle.skills,
            EntityKind::Technology => &mut bundle.technologies,
        };
        for m in regex.find_iter(text) {
            bucket.insert(m.as_str().to_lowercase());
        }
    }
    bundle.companies = extract_companies(text);
    bundle
}

fn extract_companies(_text: &str) -> BTreeSet<String> {
    BTreeSet::new()
}
