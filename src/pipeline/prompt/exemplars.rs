/// Few-shot bank: two complete discharge letters already written in the
/// placeholder vocabulary. Prepending them steers the external model toward
/// the expected structure and verbatim placeholder tokens. Separated by
/// `---`, the same divider used before the live case.
pub fn few_shot_letters() -> &'static str {
    r#"Discharge Letter

Dear REDACTED_NAME,

I am writing to inform you that you are being discharged from the hospital after receiving treatment for lobar pneumonia. You were admitted on REDACTED_ADMIT_DATE, and the improvement in your condition allows for your discharge on REDACTED_DISCHARGE_DATE.

Patient Information:
- Name: REDACTED_NAME
- Age: REDACTED_AGE
- Gender: REDACTED_GENDER
- Patient ID: REDACTED_ID
- Admission Date: REDACTED_ADMIT_DATE
- Discharge Date: REDACTED_DISCHARGE_DATE

Diagnosis:
- Lobar pneumonia, unspecified organism (J18.1)
- DRG Code: 193 - Simple pneumonia and pleurisy with MCC

Encounters:
- Admitted on REDACTED_ADMIT_DATE, with symptoms of cough, shortness of breath, hemoptysis, and fever
- Discharged on REDACTED_DISCHARGE_DATE

Medical Summary:
- Patient presented with lobar pneumonia with consolidation in the left lower lobe on the chest X-ray.
- Initial vital signs on admission showed a temperature of 38.5°C, heart rate of 90 bpm, blood pressure of 130/85 mmHg, respiratory rate of 20 breaths/min, and oxygen saturation of 92%.
- Throughout the admission, there was a gradual improvement in the patient's condition.
- Laboratory results showed a decrease in CRP levels, WBC count, and normalization of other parameters.
- Medication regimen included IV Amoxicillin, Paracetamol, and Atorvastatin, with a transition to oral antibiotics near discharge.

Plan:
- Patient responded well to treatment and is medically fit for discharge.
- Instructions for continuing oral antibiotics at home for 5 more days.
- Follow-up appointment scheduled in the outpatient clinic in two weeks.

Please feel free to contact our clinic for any further questions or concerns.

Sincerely,
REDACTED_DOCTOR

---

Date: REDACTED_DISCHARGE_DATE
Patient: REDACTED_NAME (Patient ID: REDACTED_ID)
Age: REDACTED_AGE
Gender: REDACTED_GENDER

Dear REDACTED_NAME,

I am writing to inform you that you are being discharged from the hospital after receiving treatment for lobar pneumonia. You were admitted on REDACTED_ADMIT_DATE, and the improvement in your condition allows for your discharge on REDACTED_DISCHARGE_DATE.

Diagnosis:
- Lobar pneumonia, unspecified organism (J18.1)
- Simple pneumonia and pleurisy with MCC (DRG code: 193)

Summary of care:
- You were admitted with symptoms of cough, shortness of breath, hemoptysis, and fever.
- Imaging showed consolidation in the left lower lobe.
- Lab results indicated improvement in CRP, WBC, hemoglobin, and platelet levels.
- Empirical antibiotic therapy with Amoxicillin IV and oral medications were administered.
- Vital signs and oxygen saturation remained stable and improved over the course of your stay.

Disposition:
- You are deemed medically fit for discharge and can continue your recovery at home.
- Instructions for oral antibiotics for 5 more days have been provided.
- A follow-up appointment at the outpatient clinic in two weeks is scheduled for further monitoring.

Please adhere to the prescribed treatment plan and follow-up appointments for a complete recovery. If you experience any worsening symptoms or have concerns, do not hesitate to contact us.

Take care and best wishes for your continued health and well-being.

Sincerely,
REDACTED_DOCTOR"#
}
