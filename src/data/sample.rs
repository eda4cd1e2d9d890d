//! Built-in sample dataset: the HBM_001 cost-variance drill-down used
//! when no backend is configured. Seven levels deep, mirroring the
//! shape the graph endpoint serves.

use super::model::{HierarchyNode, NodeKind};

pub const REPORT_MONTHS: [&str; 2] = ["202501", "202412"];

pub const PRODUCT_CATALOG: [(&str, &str); 16] = [
    ("HBM_001", "HBM3E 8Hi"),
    ("HBM_002", "HBM3E 12Hi"),
    ("SVR_001", "DDR5 RDIMM 64G"),
    ("SVR_002", "DDR5 MRDIMM 128G"),
    ("CXL_001", "CXL Type3 128G"),
    ("CXL_002", "CXL Type3 256G"),
    ("MBL_001", "LPDDR5X 16G"),
    ("MBL_002", "LPDDR5X 12G"),
    ("PC_001", "DDR5 16G UDIMM"),
    ("PC_002", "DDR5 32G UDIMM"),
    ("NAND_001", "4D NAND 238L"),
    ("NAND_002", "4D NAND 321L"),
    ("SSD_001", "eSSD PE8110"),
    ("SSD_002", "UFS 4.1 256G"),
    ("CIS_001", "50M Pixel CIS"),
    ("CIS_002", "200M Pixel CIS"),
];

fn n(
    id: &str,
    label: &str,
    value: f64,
    variance: f64,
    kind: NodeKind,
    relation: Option<&str>,
    children: Vec<HierarchyNode>,
) -> HierarchyNode {
    HierarchyNode {
        id: id.to_owned(),
        label: label.to_owned(),
        value,
        variance,
        kind,
        relation: relation.map(str::to_owned),
        children,
    }
}

pub fn sample_tree() -> HierarchyNode {
    use NodeKind::*;

    n("root", "HBM_001", 552.8, 45.3, Root, None, vec![
        n("p1", "조립 공정", 354.0, 22.8, Process, Some("CONSUMES"), vec![
            n("e1-1", "재료비", 142.0, 14.0, Element, Some("MATERIAL"), vec![
                n("d1-1-1", "와이어본딩", 58.0, 8.2, Driver, Some("CAUSED_BY"), vec![
                    n("dt1-1-1-1", "Au 와이어 단가", 38.0, 5.2, Detail, Some("PRICE"), vec![
                        n("sd1-1-1-1-1", "국제 금시세 상승", 28.0, 3.8, SubDetail, Some("FACTOR"), vec![
                            n("mc1-1-1-1-1-1", "투기적 수요 증가", 18.0, 2.5, Micro, Some("DEMAND"), vec![
                                n("ac1-1-1-1-1-1-1", "헤징 전략 수립", 18.0, 2.5, Action, Some("ACTION"), vec![]),
                            ]),
                            n("mc1-1-1-1-1-2", "달러 환율 영향", 10.0, 1.3, Micro, Some("FACTOR"), vec![]),
                        ]),
                        n("sd1-1-1-1-2", "사용량 증가", 10.0, 1.4, SubDetail, Some("DEMAND"), vec![
                            n("mc1-1-1-1-2-1", "HBM 적층수 증가", 7.0, 1.0, Micro, Some("FACTOR"), vec![]),
                            n("mc1-1-1-1-2-2", "불량률 소폭 상승", 3.0, 0.4, Micro, Some("FACTOR"), vec![]),
                        ]),
                    ]),
                    n("dt1-1-1-2", "Cu 전환 지연", 20.0, 3.0, Detail, Some("CONVERT"), vec![
                        n("sd1-1-1-2-1", "신뢰성 테스트 미완", 14.0, 2.0, SubDetail, Some("RISK"), vec![
                            n("mc1-1-1-2-1-1", "고객사 인증 대기", 14.0, 2.0, Micro, Some("FACTOR"), vec![
                                n("ac1-1-1-2-1-1-1", "인증 가속화 추진", 14.0, 2.0, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                        n("sd1-1-1-2-2", "설비 전환 비용", 6.0, 1.0, SubDetail, Some("FACTOR"), vec![]),
                    ]),
                ]),
                n("d1-1-2", "다이본딩", 45.0, 3.8, Driver, Some("CAUSED_BY"), vec![]),
                n("d1-1-3", "몰딩재료", 39.0, 2.0, Driver, Some("CAUSED_BY"), vec![]),
            ]),
            n("e1-2", "감가상각비", 98.0, 6.0, Element, Some("DEPRECIATION"), vec![
                n("d1-2-1", "조립설비 신규", 62.0, 4.5, Driver, Some("CAUSED_BY"), vec![
                    n("dt1-2-1-1", "와이어본더 도입", 38.0, 2.5, Detail, Some("FACTOR"), vec![
                        n("sd1-2-1-1-1", "신규 라인 증설", 38.0, 2.5, SubDetail, Some("FACTOR"), vec![
                            n("mc1-2-1-1-1-1", "생산능력 확장", 38.0, 2.5, Micro, Some("DEMAND"), vec![
                                n("ac1-2-1-1-1-1-1", "HBM 수요 대응", 38.0, 2.5, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                    ]),
                    n("dt1-2-1-2", "몰딩기 교체", 24.0, 2.0, Detail, Some("FACTOR"), vec![]),
                ]),
                n("d1-2-2", "기존설비 이월", 36.0, 1.5, Driver, Some("CAUSED_BY"), vec![]),
            ]),
            n("e1-3", "인건비", 67.0, 2.0, Element, Some("LABOR"), vec![
                n("d1-3-1", "직접인건비", 42.0, 1.2, Driver, Some("CAUSED_BY"), vec![]),
                n("d1-3-2", "간접인건비", 25.0, 0.8, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
        n("p2", "포토 공정", 245.0, 18.5, Process, Some("CONSUMES"), vec![
            n("e2-1", "감가상각비", 112.0, 14.0, Element, Some("DEPRECIATION"), vec![
                n("d2-1-1", "EUV 장비 신규", 76.0, 10.2, Driver, Some("CAUSED_BY"), vec![
                    n("dt2-1-1-1", "설비 투자액 증가", 50.0, 7.0, Detail, Some("ROOT_CAUSE"), vec![
                        n("sd2-1-1-1-1", "ASML 장비 도입", 35.0, 5.0, SubDetail, Some("SUPPLY"), vec![
                            n("mc2-1-1-1-1-1", "장비 단가 상승", 22.0, 3.0, Micro, Some("PRICE"), vec![
                                n("ac2-1-1-1-1-1-1", "장기 계약 재협상", 22.0, 3.0, Action, Some("ACTION"), vec![]),
                            ]),
                            n("mc2-1-1-1-1-2", "설치비용 증가", 13.0, 2.0, Micro, Some("FACTOR"), vec![]),
                        ]),
                        n("sd2-1-1-1-2", "클린룸 확장", 15.0, 2.0, SubDetail, Some("FACTOR"), vec![
                            n("mc2-1-1-1-2-1", "면적 증가", 9.0, 1.2, Micro, Some("FACTOR"), vec![]),
                            n("mc2-1-1-1-2-2", "방진 등급 상향", 6.0, 0.8, Micro, Some("FACTOR"), vec![]),
                        ]),
                    ]),
                    n("dt2-1-1-2", "가동률 상승", 26.0, 3.2, Detail, Some("ROOT_CAUSE"), vec![
                        n("sd2-1-1-2-1", "양산 물량 증가", 18.0, 2.2, SubDetail, Some("DEMAND"), vec![
                            n("mc2-1-1-2-1-1", "HBM3E 수요", 12.0, 1.5, Micro, Some("DEMAND"), vec![
                                n("ac2-1-1-2-1-1-1", "AI 서버 수요 급증", 12.0, 1.5, Action, Some("IMPACT"), vec![]),
                            ]),
                            n("mc2-1-1-2-1-2", "서버DRAM 수요", 6.0, 0.7, Micro, Some("DEMAND"), vec![]),
                        ]),
                        n("sd2-1-1-2-2", "테스트런 증가", 8.0, 1.0, SubDetail, Some("FACTOR"), vec![
                            n("mc2-1-1-2-2-1", "공정 안정화", 8.0, 1.0, Micro, Some("FACTOR"), vec![]),
                        ]),
                    ]),
                ]),
                n("d2-1-2", "기존 ArF 장비", 36.0, 3.8, Driver, Some("CAUSED_BY"), vec![]),
            ]),
            n("e2-2", "재료비", 78.0, 3.0, Element, Some("MATERIAL"), vec![
                n("d2-2-1", "포토레지스트", 48.0, 2.1, Driver, Some("CAUSED_BY"), vec![
                    n("dt2-2-1-1", "단가 상승", 30.0, 1.5, Detail, Some("PRICE"), vec![
                        n("sd2-2-1-1-1", "일본 공급사 인상", 20.0, 1.0, SubDetail, Some("SUPPLY"), vec![
                            n("mc2-2-1-1-1-1", "엔화 환율", 10.0, 0.5, Micro, Some("FACTOR"), vec![
                                n("ac2-2-1-1-1-1-1", "환율 모니터링", 10.0, 0.5, Action, Some("ACTION"), vec![]),
                            ]),
                            n("mc2-2-1-1-1-2", "수출규제 리스크", 10.0, 0.5, Micro, Some("RISK"), vec![
                                n("ac2-2-1-1-1-2-1", "국산 대체재 R&D", 10.0, 0.5, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                        n("sd2-2-1-1-2", "EUV용 전환", 10.0, 0.5, SubDetail, Some("CONVERT"), vec![
                            n("mc2-2-1-1-2-1", "차세대 소재비", 10.0, 0.5, Micro, Some("FACTOR"), vec![]),
                        ]),
                    ]),
                    n("dt2-2-1-2", "사용량 증가", 18.0, 0.6, Detail, Some("DEMAND"), vec![]),
                ]),
                n("d2-2-2", "마스크비", 30.0, 0.9, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
        n("p3", "CMP 공정", 167.0, 15.6, Process, Some("CONSUMES"), vec![
            n("e3-1", "재료비", 98.0, 9.0, Element, Some("MATERIAL"), vec![
                n("d3-1-1", "슬러리", 56.0, 5.2, Driver, Some("CAUSED_BY"), vec![
                    n("dt3-1-1-1", "슬러리 단가 상승", 35.0, 3.5, Detail, Some("ROOT_CAUSE"), vec![
                        n("sd3-1-1-1-1", "공급사 가격 인상", 25.0, 2.5, SubDetail, Some("SUPPLY"), vec![
                            n("mc3-1-1-1-1-1", "단일 공급사 리스크", 18.0, 1.8, Micro, Some("RISK"), vec![
                                n("ac3-1-1-1-1-1-1", "대체 공급사 확보", 18.0, 1.8, Action, Some("ACTION"), vec![]),
                            ]),
                            n("mc3-1-1-1-1-2", "원자재(세리아) 가격", 7.0, 0.7, Micro, Some("PRICE"), vec![
                                n("ac3-1-1-1-1-2-1", "세리아 수급 모니터링", 7.0, 0.7, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                        n("sd3-1-1-1-2", "고순도 전환", 10.0, 1.0, SubDetail, Some("CONVERT"), vec![
                            n("mc3-1-1-1-2-1", "미세공정 요구", 10.0, 1.0, Micro, Some("FACTOR"), vec![
                                n("ac3-1-1-1-2-1-1", "3nm 공정 대응", 10.0, 1.0, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                    ]),
                    n("dt3-1-1-2", "품질 개선품 사용", 21.0, 1.7, Detail, Some("ROOT_CAUSE"), vec![
                        n("sd3-1-1-2-1", "고순도 슬러리", 15.0, 1.2, SubDetail, Some("FACTOR"), vec![
                            n("mc3-1-1-2-1-1", "불순물 규격 강화", 15.0, 1.2, Micro, Some("FACTOR"), vec![]),
                        ]),
                        n("sd3-1-1-2-2", "신규 첨가제", 6.0, 0.5, SubDetail, Some("FACTOR"), vec![]),
                    ]),
                ]),
                n("d3-1-2", "패드비용", 28.0, 2.8, Driver, Some("CAUSED_BY"), vec![]),
                n("d3-1-3", "린스액", 14.0, 1.0, Driver, Some("CAUSED_BY"), vec![]),
            ]),
            n("e3-2", "감가상각비", 45.0, 5.0, Element, Some("DEPRECIATION"), vec![
                n("d3-2-1", "CMP 장비 추가", 45.0, 5.0, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
        n("p4", "식각 공정", 198.0, 12.2, Process, Some("CONSUMES"), vec![
            n("e4-1", "재료비", 89.0, 7.0, Element, Some("MATERIAL"), vec![
                n("d4-1-1", "에칭가스", 54.0, 4.5, Driver, Some("CAUSED_BY"), vec![
                    n("dt4-1-1-1", "NF3 가스", 32.0, 2.5, Detail, Some("FACTOR"), vec![
                        n("sd4-1-1-1-1", "글로벌 수요 증가", 20.0, 1.5, SubDetail, Some("DEMAND"), vec![
                            n("mc4-1-1-1-1-1", "반도체 투자 확대", 13.0, 1.0, Micro, Some("DEMAND"), vec![]),
                            n("mc4-1-1-1-1-2", "디스플레이 수요", 7.0, 0.5, Micro, Some("DEMAND"), vec![]),
                        ]),
                        n("sd4-1-1-1-2", "생산설비 제한", 12.0, 1.0, SubDetail, Some("SUPPLY"), vec![
                            n("mc4-1-1-1-2-1", "신규 설비 투자", 12.0, 1.0, Micro, Some("FACTOR"), vec![
                                n("ac4-1-1-1-2-1-1", "국산 가스 개발", 12.0, 1.0, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                    ]),
                    n("dt4-1-1-2", "CF4 가스", 22.0, 2.0, Detail, Some("FACTOR"), vec![
                        n("sd4-1-1-2-1", "환경규제 강화", 14.0, 1.2, SubDetail, Some("RISK"), vec![
                            n("mc4-1-1-2-1-1", "탄소세 부과", 14.0, 1.2, Micro, Some("FACTOR"), vec![
                                n("ac4-1-1-2-1-1-1", "저탄소 대안 검토", 14.0, 1.2, Action, Some("ACTION"), vec![]),
                            ]),
                        ]),
                        n("sd4-1-1-2-2", "단가 인상", 8.0, 0.8, SubDetail, Some("PRICE"), vec![]),
                    ]),
                ]),
                n("d4-1-2", "챔버부품", 35.0, 2.5, Driver, Some("CAUSED_BY"), vec![]),
            ]),
            n("e4-2", "감가상각비", 65.0, 4.0, Element, Some("DEPRECIATION"), vec![
                n("d4-2-1", "식각설비 신규", 65.0, 4.0, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
        n("p5", "패키징", 287.0, 8.9, Process, Some("CONSUMES"), vec![
            n("e5-1", "재료비", 134.0, 6.0, Element, Some("MATERIAL"), vec![
                n("d5-1-1", "기판비용", 78.0, 3.5, Driver, Some("CAUSED_BY"), vec![
                    n("dt5-1-1-1", "ABF 기판 단가", 52.0, 2.3, Detail, Some("PRICE"), vec![
                        n("sd5-1-1-1-1", "고다층 기판 수요", 35.0, 1.5, SubDetail, Some("DEMAND"), vec![
                            n("mc5-1-1-1-1-1", "AI 가속기 패키징", 22.0, 1.0, Micro, Some("DEMAND"), vec![]),
                            n("mc5-1-1-1-1-2", "12층+ 기판 요구", 13.0, 0.5, Micro, Some("FACTOR"), vec![]),
                        ]),
                        n("sd5-1-1-1-2", "공급 부족", 17.0, 0.8, SubDetail, Some("SUPPLY"), vec![]),
                    ]),
                    n("dt5-1-1-2", "사용량 증가", 26.0, 1.2, Detail, Some("DEMAND"), vec![]),
                ]),
                n("d5-1-2", "솔더볼", 56.0, 2.5, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
        n("p6", "증착", 223.0, 8.3, Process, Some("CONSUMES"), vec![
            n("e6-1", "재료비", 95.0, 5.0, Element, Some("MATERIAL"), vec![
                n("d6-1-1", "타겟재료", 58.0, 3.2, Driver, Some("CAUSED_BY"), vec![
                    n("dt6-1-1-1", "희귀금속 단가", 40.0, 2.2, Detail, Some("PRICE"), vec![
                        n("sd6-1-1-1-1", "코발트 가격 상승", 25.0, 1.4, SubDetail, Some("PRICE"), vec![
                            n("mc6-1-1-1-1-1", "전기차 배터리 수요", 16.0, 0.9, Micro, Some("DEMAND"), vec![]),
                            n("mc6-1-1-1-1-2", "광산 공급 제한", 9.0, 0.5, Micro, Some("SUPPLY"), vec![]),
                        ]),
                        n("sd6-1-1-1-2", "텅스텐 수급", 15.0, 0.8, SubDetail, Some("SUPPLY"), vec![]),
                    ]),
                    n("dt6-1-1-2", "타겟 교체 주기", 18.0, 1.0, Detail, Some("FACTOR"), vec![]),
                ]),
                n("d6-1-2", "가스류", 37.0, 1.8, Driver, Some("CAUSED_BY"), vec![]),
            ]),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sample_ids_are_unique() {
        let tree = sample_tree();
        let mut ids = HashSet::new();
        tree.collect_ids(&mut ids);
        assert_eq!(ids.len(), tree.node_count());
    }

    #[test]
    fn sample_root_shape() {
        let tree = sample_tree();
        assert_eq!(tree.id, "root");
        assert_eq!(tree.kind, NodeKind::Root);
        assert_eq!(tree.children.len(), 6);
        assert_eq!(tree.children[0].label, "조립 공정");
        assert_eq!(tree.children[1].label, "포토 공정");
    }

    #[test]
    fn sample_flattens_cleanly() {
        let tree = sample_tree();
        let graph = super::super::model::flatten_tree(&tree);
        assert_eq!(graph.nodes.len(), tree.node_count());
        assert_eq!(graph.links.len(), tree.node_count() - 1);
        assert_eq!(graph.sanitized_links().len(), graph.links.len());
    }
}
