//! A small GENIA-style event document shared by the crate tests.

pub(super) const GENIA_TEXT: &str = "Bone morphogenetic protein 6 (BMP-6) signalling in human B cells. Stimulation of B cells with BMP-6 for 2 hours resulted in a fast and consecutive production of Id1 mRNA.";

pub(super) const GENIA_ANN: &str = "T1\tProtein 30 35\tBMP-6\n\
                                 T2\tProtein 161 164\tId1\n\
                                 T3\tProtein 94 99\tBMP-6\n\
                                 T7\tPositive_regulation 135 146\tconsecutive\n\
                                 T8\tGene_expression 147 157\tproduction\n\
                                 E1\tPositive_regulation:T7 Theme:E2\n\
                                 E2\tGene_expression:T8 Theme:T2\n\
                                 A1\tSpeculation E1\n\
                                 *\tEquiv T1 T3\n\
                                 #1\tAnnotatorNotes T3\tsecond mention of the ligand\n";
