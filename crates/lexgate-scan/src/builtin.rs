//! Built-in indicator sets.
//!
//! The baseline corpus covers, per language: privilege assertions
//! (statutory references and "privileged & confidential" formulas),
//! internal memo markers (file-note headers, collegial salutations),
//! client identifiers (mandate/client number formats, "our client"
//! formulas), and internal case-file reference formats.
//!
//! Weights: explicit privilege assertions and exact client/mandate-number
//! formats are block-grade (>= 0.6, a single match can block); salutations
//! and soft markers sit at 0.3-0.5. Deliberately absent: court citation
//! formats (e.g. "4A_123/2020"): citing precedent is exactly what
//! legitimate research queries do.

use lexgate_core::IndicatorCategory::{
    CaseFileRef, ClientIdentifier, InternalMemo, PrivilegeAssertion,
};
use lexgate_core::Language::{De, En, Fr, It};
use lexgate_core::{IndicatorCategory, IndicatorDef, Language};

fn def(
    category: IndicatorCategory,
    language: Language,
    pattern: &str,
    weight: f64,
) -> IndicatorDef {
    IndicatorDef {
        category,
        language,
        pattern: pattern.to_string(),
        weight,
    }
}

/// The built-in indicator definitions, in stable order.
pub fn indicator_defs() -> Vec<IndicatorDef> {
    vec![
        // ===== Privilege assertions =====
        def(PrivilegeAssertion, De, r"anwaltsgeheimnis", 0.9),
        def(PrivilegeAssertion, De, r"berufsgeheimnis", 0.7),
        def(PrivilegeAssertion, De, r"art\.?\s*321\s*stgb", 0.9),
        def(PrivilegeAssertion, De, r"vertraulich\s+und\s+privilegiert", 0.8),
        def(PrivilegeAssertion, De, r"nicht\s+zur\s+weitergabe\s+bestimmt", 0.5),
        def(PrivilegeAssertion, Fr, r"secret\s+professionnel\s+de\s+l['’]avocat", 0.9),
        def(PrivilegeAssertion, Fr, r"couvert\s+par\s+le\s+secret\s+professionnel", 0.8),
        def(PrivilegeAssertion, Fr, r"confidentiel\s+et\s+privil[ée]gi[ée]", 0.8),
        def(PrivilegeAssertion, Fr, r"art\.?\s*321\s*cps?", 0.8),
        def(PrivilegeAssertion, It, r"segreto\s+professionale\s+dell['’]avvocato", 0.9),
        def(PrivilegeAssertion, It, r"coperto\s+dal\s+segreto\s+professionale", 0.8),
        def(PrivilegeAssertion, It, r"riservato\s+e\s+privilegiato", 0.8),
        def(PrivilegeAssertion, En, r"attorney[-\s]client\s+privilege", 0.9),
        def(PrivilegeAssertion, En, r"privileged\s+(?:and|&)\s+confidential", 0.9),
        def(PrivilegeAssertion, En, r"legally\s+privileged", 0.8),
        def(PrivilegeAssertion, En, r"legal\s+professional\s+privilege", 0.8),
        // ===== Internal memo markers =====
        def(InternalMemo, De, r"aktennotiz", 0.5),
        def(InternalMemo, De, r"interne\s+notiz", 0.5),
        def(InternalMemo, De, r"zur\s+internen\s+verwendung", 0.5),
        def(InternalMemo, De, r"sehr\s+geehrter?\s+(?:herr|frau)\s+kolleg", 0.4),
        def(InternalMemo, Fr, r"note\s+interne", 0.5),
        def(InternalMemo, Fr, r"note\s+au\s+dossier", 0.5),
        def(InternalMemo, Fr, r"[àa]\s+usage\s+interne", 0.5),
        def(InternalMemo, Fr, r"cher\s+confr[èe]re", 0.4),
        def(InternalMemo, Fr, r"ch[èe]re\s+cons(?:œ|oe)ur", 0.4),
        def(InternalMemo, It, r"nota\s+interna", 0.5),
        def(InternalMemo, It, r"appunto\s+interno", 0.5),
        def(InternalMemo, It, r"ad\s+uso\s+interno", 0.5),
        def(InternalMemo, It, r"egregio\s+collega", 0.4),
        def(InternalMemo, En, r"internal\s+memo(?:randum)?", 0.5),
        def(InternalMemo, En, r"for\s+internal\s+use\s+only", 0.5),
        def(InternalMemo, En, r"attorney\s+work\s+product", 0.5),
        def(InternalMemo, En, r"dear\s+colleague", 0.4),
        // ===== Client identifiers =====
        def(ClientIdentifier, De, r"unsere?\s+mandant(?:in)?", 0.7),
        def(ClientIdentifier, De, r"mandats[-\s]?(?:nr|nummer)\.?\s*[:#]?\s*\S+", 0.8),
        def(ClientIdentifier, De, r"klienten[-\s]?(?:nr|nummer)", 0.7),
        def(ClientIdentifier, Fr, r"notre\s+mandante?", 0.7),
        def(ClientIdentifier, Fr, r"notre\s+cliente?\b", 0.7),
        def(ClientIdentifier, Fr, r"mandat\s+n[°o]\s*\S+", 0.8),
        def(ClientIdentifier, It, r"il\s+nostro\s+mandante", 0.7),
        def(ClientIdentifier, It, r"(?:il\s+nostro|la\s+nostra)\s+cliente", 0.7),
        def(ClientIdentifier, It, r"mandato\s+n[°o.]\s*\S+", 0.8),
        def(ClientIdentifier, En, r"\bour\s+client\b", 0.7),
        def(ClientIdentifier, En, r"client\s+(?:no|number|ref)\.?\s*[:#]?\s*\S+", 0.8),
        def(ClientIdentifier, En, r"matter\s+(?:no|number)\.?\s*[:#]?\s*\S+", 0.8),
        def(ClientIdentifier, En, r"on\s+behalf\s+of\s+our\s+client", 0.8),
        // ===== Case-file references =====
        def(CaseFileRef, De, r"\bakte\s+nr\.?\s*\S+", 0.6),
        def(CaseFileRef, De, r"verfahrens[-\s]?nr\.?\s*\S+", 0.6),
        def(CaseFileRef, De, r"geschäfts[-\s]?nr\.?\s*\S+", 0.5),
        def(CaseFileRef, Fr, r"dossier\s+n[°o]\s*\S+", 0.6),
        def(CaseFileRef, Fr, r"r[ée]f[ée]rence\s+du\s+dossier", 0.5),
        def(CaseFileRef, It, r"pratica\s+n[°o.]\s*\S+", 0.6),
        def(CaseFileRef, It, r"incarto\s+n[°o.]\s*\S+", 0.5),
        def(CaseFileRef, En, r"case\s+file\s+(?:no|ref)\.?\s*\S+", 0.6),
        def(CaseFileRef, En, r"\bour\s+ref\.?\s*[:#]\s*\S+", 0.5),
    ]
}
