//! Built-in catalog for the CSS092 RMU high-voltage switching procedure.

use once_cell::sync::Lazy;

use super::{Sequence, Step, StepCatalog};
use crate::domain::foundation::StepId;

/// Site label pre-filled into form metadata.
pub const CSS092_SITE_LABEL: &str = "T2D Precast Facility – CSS092";

/// (id, location, device, action, items, safety person, locks required)
type StepRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
);

#[rustfmt::skip]
const DE_ENERGISE_STEPS: [StepRow; 9] = [
    ("de1", "HVDB0027 RMU", "Feeder CB (Q11-1 Incomer)", "Open feeder breaker to isolate supply to CSS092 and apply lock.", "Switch key, Cat 3 PPE", "Yes", true),
    ("de2", "CSS092 RMU", "Q11-1 Incomer", "Open incomer; verify VPIS dark and apply lock.", "HV handle, LOTO", "Yes", true),
    ("de3", "CSS092 RMU", "Q11-1E Earth Switch", "Close earth on incomer; lock & tag.", "Padlock, tag", "Yes", false),
    ("de4", "CSS092 RMU", "Q11-2 Feeder", "Open feeder to de-energise transformer and apply lock.", "HV handle, LOTO", "Yes", true),
    ("de5", "CSS092 RMU", "Q11-2E Earth Switch", "Close earth on transformer feeder; lock & tag.", "Padlock, tag", "Yes", false),
    ("de6", "CSS092 LV Board", "Main CB 415 V", "Open & isolate LV main; apply lock.", "Padlock, tag", "Yes", true),
    ("de7", "CSS092 RMU", "All Ways", "Prove dead with approved 11 kV tester.", "Proving unit, gloves", "Yes", false),
    ("de8", "CSS092 RMU", "All Panels", "Fit danger signs; confirm “earthed”.", "Signage kit", "Yes", false),
    ("de9", "CSS092 RMU", "Permit to Work", "Issue PTW to competent person.", "PTW book, key safe", "—", false),
];

#[rustfmt::skip]
const ENERGISE_STEPS: [StepRow; 7] = [
    ("en1", "CSS092 RMU", "Permit to Work", "Work complete; cancel PTW & retrieve keys.", "PTW book", "—", false),
    ("en2", "CSS092 RMU", "Earth Switches", "Remove earths in reverse order (Q11-2E, Q11-1E, etc.).", "Padlock keys, HV handle", "Yes", false),
    ("en3", "CSS092 RMU", "Q11-1 Incomer", "Close incomer; confirm VPIS lit.", "HV handle, PPE", "Yes", false),
    ("en4", "CSS092 RMU", "Q11-2 Feeder", "Close feeder to energise transformer.", "HV handle, PPE", "Yes", false),
    ("en5", "CSS092 LV Board", "Main CB", "Close LV main to energise board.", "Multimeter, PPE", "Yes", false),
    ("en6", "HVDB0027 RMU", "Feeder CB", "Close feeder breaker to restore supply.", "Switch key, permit", "Yes", false),
    ("en7", "CSS092 RMU", "All Panels", "Remove Danger signs; confirm normal operation.", "Signage kit", "Yes", false),
];

static CSS092_HV_SWITCHING: Lazy<StepCatalog> = Lazy::new(|| {
    let mut steps = Vec::with_capacity(DE_ENERGISE_STEPS.len() + ENERGISE_STEPS.len());
    for (sequence, rows) in [
        (Sequence::DeEnergise, &DE_ENERGISE_STEPS[..]),
        (Sequence::Energise, &ENERGISE_STEPS[..]),
    ] {
        for (position, row) in rows.iter().enumerate() {
            steps.push(step_from_row(sequence, position as u32 + 1, row));
        }
    }

    StepCatalog::new(steps)
        .expect("built-in CSS092 catalog is well-formed")
        .with_site_label(CSS092_SITE_LABEL)
});

fn step_from_row(sequence: Sequence, order: u32, row: &StepRow) -> Step {
    let (id, location, device, action, items, safety_person, locks) = *row;
    let step = Step::new(
        StepId::new(id).expect("built-in step ids are non-empty"),
        sequence,
        order,
    )
    .with_location(location)
    .with_device(device)
    .with_action(action)
    .with_items(items)
    .with_safety_person(safety_person);

    if locks {
        step.requiring_secondary_confirmation()
    } else {
        step
    }
}

impl StepCatalog {
    /// The HV switching procedure for the CSS092 ring main unit.
    ///
    /// Nine de-energise steps (locks required on de1, de2, de4 and de6)
    /// followed by seven energise steps. Earths and locks are removed in the
    /// reverse of the order they were applied; that convention is carried in
    /// the step wording rather than enforced.
    pub fn css092_hv_switching() -> StepCatalog {
        CSS092_HV_SWITCHING.clone()
    }
}
