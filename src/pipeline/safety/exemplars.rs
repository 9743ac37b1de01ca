/// Worked discharge-readiness cases seeded into every adjudication prompt.
///
/// Each exemplar pairs a clinical vignette with a verdict line in the exact
/// shape the response contract demands, followed by the reasoning trace.
/// One clear Yes and one clear No, so the model sees both directions.
pub fn adjudication_exemplars() -> &'static str {
    r#"Case:
2024-02-10 - Admitted with sepsis secondary to a urinary source. Hypotensive on arrival, started on IV antibiotics and fluids.
2024-02-14 - Afebrile for 48 hours. Inflammatory markers falling. Eating and drinking, mobilising with the physiotherapist.
2024-02-15 - Observations stable. Switched to oral antibiotics. Keen to go home.

Answer: Yes
Reasoning: The presenting infection has responded to treatment. The patient has been afebrile for more than 24 hours, observations are stable, and the switch to oral antibiotics is an accepted discharge criterion. Nothing in the recent notes documents an ongoing acute concern.

---

Case:
2024-03-01 - Admitted with an infective exacerbation of COPD. Requiring 4L oxygen to maintain saturations.
2024-03-04 - Breathless at rest. Still requiring 2L oxygen overnight. Chest physiotherapy continued.
2024-03-05 - Oxygen requirement persists. Overnight the condition remained unstable and the patient requires close monitoring.

Answer: No
Reasoning: The patient still has an oxygen requirement above baseline, and the most recent note documents overnight instability with a need for close monitoring. Acute treatment is not complete, so discharge is not safe."#
}
