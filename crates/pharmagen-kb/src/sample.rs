//! Demonstration input: a single-sample VCF covering one variant in each
//! supported pharmacogene, and the drug list that exercises all six genes.

pub const SAMPLE_VCF: &str = "##fileformat=VCFv4.2
##FILTER=<ID=PASS,Description=\"All filters passed\">
##INFO=<ID=GENE,Number=1,Type=String,Description=\"Gene name\">
##INFO=<ID=STAR,Number=1,Type=String,Description=\"Star allele\">
##INFO=<ID=RS,Number=1,Type=String,Description=\"RS number\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tPATIENT_DEMO01
chr22\t42522613\trs3892097\tC\tT\t100\tPASS\tGENE=CYP2D6;STAR=*4;RS=3892097\tGT\t0/1
chr10\t96521657\trs4244285\tG\tA\t100\tPASS\tGENE=CYP2C19;STAR=*2;RS=4244285\tGT\t1/1
chr10\t96702047\trs1799853\tC\tT\t100\tPASS\tGENE=CYP2C9;STAR=*2;RS=1799853\tGT\t0/1
chr12\t21331549\trs4149056\tT\tC\t100\tPASS\tGENE=SLCO1B1;STAR=*5;RS=4149056\tGT\t0/1
chr6\t18128556\trs1800462\tC\tG\t100\tPASS\tGENE=TPMT;STAR=*2;RS=1800462\tGT\t0/1
chr1\t97915614\trs3918290\tC\tT\t100\tPASS\tGENE=DPYD;STAR=*2A;RS=3918290\tGT\t0/1";

pub const SAMPLE_DRUGS: &str = "CODEINE, WARFARIN, CLOPIDOGREL, SIMVASTATIN, AZATHIOPRINE, FLUOROURACIL";
