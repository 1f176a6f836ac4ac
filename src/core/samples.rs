//! Built-in sample clinical texts, selectable from the Text tab.
//!
//! Three short excerpts that exercise different parts of the backend's
//! taxonomy: a protocol synopsis, an AE/SAE safety section, and an ICH E3
//! CSR template fragment.

/// A named sample text.
pub struct SampleText {
    pub title: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: [SampleText; 3] = [
    SampleText {
        title: "Protocol Synopsis",
        text: "This is a Phase 3, randomized, double-blind, placebo-controlled, multicenter study to evaluate the efficacy and safety of Drug XYZ-500 in patients with advanced non-small cell lung cancer (NSCLC) who have progressed on prior platinum-based chemotherapy.

This study will be conducted in accordance with Good Clinical Practice (GCP) as defined by the International Council for Harmonisation (ICH) and in accordance with the ethical principles underlying European Union Directive 2001/20/EC and the United States Code of Federal Regulations, Title 21, Part 50 (21CFR50).

Primary Endpoint: The primary endpoint is progression-free survival (PFS), defined as the time from randomization to the first documented disease progression per RECIST v1.1 or death from any cause, whichever occurs first.

Inclusion Criteria:
1. Age ≥18 years at the time of informed consent
2. Histologically or cytologically confirmed diagnosis of Stage IIIB or IV NSCLC
3. Documented disease progression following prior platinum-based chemotherapy
4. ECOG performance status of 0 or 1
5. Adequate organ function as defined by laboratory values",
    },
    SampleText {
        title: "Safety Section",
        text: "Adverse Event Reporting and Safety Monitoring

An adverse event (AE) is defined as any untoward medical occurrence in a clinical trial subject administered a medicinal product, which does not necessarily have a causal relationship with the treatment. An AE can therefore be any unfavorable and unintended sign, symptom, or disease temporally associated with the use of a medicinal product.

A serious adverse event (SAE) is any AE that results in: death, is life-threatening, requires inpatient hospitalization or prolongation of existing hospitalization, results in persistent or significant disability/incapacity, is a congenital anomaly/birth defect, or is a medically important event.

All AEs must be recorded from the time of informed consent until 30 days after the last dose of study drug. SAEs must be reported to the Sponsor within 24 hours of awareness. The Investigator must assess the relationship of each AE to study drug using the following categories: not related, unlikely related, possibly related, probably related, or definitely related.",
    },
    SampleText {
        title: "ICH E3 CSR Template",
        text: "STRUCTURE AND CONTENT OF CLINICAL STUDY REPORTS

The clinical study report described in this guideline is an \"integrated\" full report of an individual study of any therapeutic, prophylactic or diagnostic agent conducted in patients, in which the clinical and statistical description, presentations, and analyses are integrated into a single report.

TITLE PAGE: The title page should contain the following information: study title, name of test drug/investigational product, indication studied, name of the sponsor, protocol identification, development phase of study, study initiation date, study completion date, name and affiliation of principal investigator, statement indicating compliance with Good Clinical Practices.

SYNOPSIS: A brief synopsis (usually limited to 3 pages) that summarises the study should be provided. The synopsis should include numerical data to illustrate results, not just text or p-values.

ETHICS: It should be confirmed that the study was conducted in accordance with the ethical principles that have their origins in the Declaration of Helsinki. How and when informed consent was obtained should be described.

PATIENT DISPOSITION: There should be a clear accounting of all patients who entered the study, using figures or tables. The numbers of patients randomised and who completed each phase should be provided, as well as reasons for discontinuations.

SAFETY EVALUATION: A serious adverse event is any untoward medical occurrence that at any dose results in death, is life-threatening, requires hospitalisation, or results in persistent disability.",
    },
];

/// Look up a sample by zero-based index.
pub fn get(index: usize) -> Option<&'static SampleText> {
    SAMPLES.get(index)
}
