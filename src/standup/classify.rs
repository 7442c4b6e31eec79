//! Section ordering and task bucketing.

use std::collections::HashMap;

use crate::todoist::{Section, Task};

/// A section and the tasks filed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBucket {
    pub section: Section,
    pub tasks: Vec<Task>,
}

/// Stable sort by `order`; ties keep input position.
pub fn sort_sections(sections: &[Section]) -> Vec<Section> {
    let mut sorted = sections.to_vec();
    sorted.sort_by_key(|s| s.order);
    sorted
}

/// Group tasks by section, in section order.
///
/// Every known section gets a bucket even when empty. Tasks without a section
/// or pointing at an unknown one are dropped.
pub fn classify(tasks: &[Task], sections: &[Section]) -> Vec<SectionBucket> {
    let sorted = sort_sections(sections);
    let mut buckets: Vec<SectionBucket> = Vec::with_capacity(sorted.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for section in &sorted {
        if index.contains_key(section.id.as_str()) {
            continue;
        }
        index.insert(section.id.as_str(), buckets.len());
        buckets.push(SectionBucket {
            section: section.clone(),
            tasks: Vec::new(),
        });
    }

    let mut dropped = 0usize;
    for task in tasks {
        match task.section_id.as_deref().and_then(|id| index.get(id)) {
            Some(&i) => buckets[i].tasks.push(task.clone()),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!("{} task(s) outside known sections ignored", dropped);
    }

    buckets
}
