//! The five fixed sample bulletins loaded by [`MemoryStore::seeded`].
//!
//! Publish dates descend strictly with the reference suffix, so
//! `latest_bo_documents` over the seeds is deterministic: BO-2025-001 first,
//! then 002, 003, 004, 005. Categories and priorities cover the combinations
//! the dashboards filter on.
//!
//! [`MemoryStore::seeded`]: crate::MemoryStore::seeded

use chrono::{DateTime, TimeZone, Utc};
use confo_core::document::{NewBoDocument, Priority};

fn publish_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, day, 0, 0, 0)
    .single()
    .expect("static seed date")
}

/// The fixed seed set, in insertion order.
pub fn sample_documents() -> Vec<NewBoDocument> {
  vec![
    NewBoDocument {
      title:        "Décret relatif aux obligations de conformité \
                     environnementale des unités industrielles"
        .into(),
      title_ar:     Some("مرسوم يتعلق بالتزامات المطابقة البيئية للوحدات الصناعية".into()),
      reference:    "BO-2025-001".into(),
      publish_date: publish_date(2025, 1, 15),
      category:     "regulatory".into(),
      sector:       Some("industrie".into()),
      content_fr:   "Les unités industrielles disposent d'un délai de six \
                     mois pour déposer leur dossier de mise en conformité \
                     environnementale auprès de l'autorité compétente."
        .into(),
      content_ar:   None,
      summary_fr:   Some(
        "Mise en conformité environnementale obligatoire sous six mois."
          .into(),
      ),
      summary_ar:   None,
      priority:     Priority::Urgent,
      pdf_url:      None,
    },
    NewBoDocument {
      title:        "Loi modifiant le régime des sociétés à responsabilité \
                     limitée"
        .into(),
      title_ar:     Some("قانون يعدل نظام الشركات ذات المسؤولية المحدودة".into()),
      reference:    "BO-2025-002".into(),
      publish_date: publish_date(2025, 1, 12),
      category:     "legal".into(),
      sector:       None,
      content_fr:   "Le capital social minimum et les formalités de \
                     constitution des SARL sont révisés."
        .into(),
      content_ar:   None,
      summary_fr:   Some("Révision des formalités de constitution des SARL.".into()),
      summary_ar:   None,
      priority:     Priority::Medium,
      pdf_url:      None,
    },
    NewBoDocument {
      title:        "Arrêté fixant le barème de la taxe professionnelle \
                     pour l'exercice 2025"
        .into(),
      title_ar:     None,
      reference:    "BO-2025-003".into(),
      publish_date: publish_date(2025, 1, 10),
      category:     "tax".into(),
      sector:       None,
      content_fr:   "Le barème de la taxe professionnelle applicable à \
                     l'exercice 2025 est publié en annexe."
        .into(),
      content_ar:   None,
      summary_fr:   None,
      summary_ar:   None,
      priority:     Priority::Low,
      pdf_url:      None,
    },
    NewBoDocument {
      title:        "Décret portant sur l'étiquetage des produits \
                     agroalimentaires"
        .into(),
      title_ar:     None,
      reference:    "BO-2025-004".into(),
      publish_date: publish_date(2025, 1, 8),
      category:     "regulatory".into(),
      sector:       Some("agroalimentaire".into()),
      content_fr:   "De nouvelles mentions obligatoires s'appliquent à \
                     l'étiquetage des produits agroalimentaires."
        .into(),
      content_ar:   None,
      summary_fr:   None,
      summary_ar:   None,
      priority:     Priority::Medium,
      pdf_url:      None,
    },
    NewBoDocument {
      title:        "Loi sur la protection des données à caractère \
                     personnel dans le secteur des services"
        .into(),
      title_ar:     Some("قانون حماية المعطيات ذات الطابع الشخصي في قطاع الخدمات".into()),
      reference:    "BO-2025-005".into(),
      publish_date: publish_date(2025, 1, 5),
      category:     "legal".into(),
      sector:       Some("services".into()),
      content_fr:   "Les prestataires de services doivent désigner un \
                     responsable du traitement des données et déclarer \
                     leurs traitements."
        .into(),
      content_ar:   None,
      summary_fr:   Some(
        "Obligation de désigner un responsable du traitement des données."
          .into(),
      ),
      summary_ar:   None,
      priority:     Priority::Urgent,
      pdf_url:      None,
    },
  ]
}
